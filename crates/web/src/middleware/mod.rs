//! Request extractors and layers.
//!
//! - [`session::CurrentUser`] -- the logged-in user, if any, for this request.
//! - [`session::build_session_layer`] -- cookie-backed session management.

pub mod session;
