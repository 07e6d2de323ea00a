//! HTTP client for the instance registry REST API.
//!
//! - [`api::RegistryApi`] -- submits instance drafts (create / update).
//! - [`response::ApiResponse`] -- decodes the registry's status envelope.

pub mod api;
pub mod response;

pub use api::{RegistryApi, RegistryApiError, SubmitOutcome};
