use std::sync::Arc;

use registry_client::RegistryApi;

use crate::auth::Authenticator;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Client for the instance registry API.
    pub registry: Arc<RegistryApi>,
    /// Verifies login credentials.
    pub authenticator: Arc<dyn Authenticator>,
}
