//! Domain types for the instance registry front end.
//!
//! Everything here is pure: mapping submitted form fields into the payload
//! the registry API expects, deciding which API call a submission targets,
//! and the small value types shared by the HTTP client and the web crate.

pub mod credential;
pub mod error;
pub mod instance;
pub mod notice;
