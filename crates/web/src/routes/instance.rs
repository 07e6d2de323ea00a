//! Route definitions for the `/instance` form.

use axum::routing::get;
use axum::Router;

use crate::handlers::instance;
use crate::state::AppState;

/// ```text
/// GET  /instance  -> form_page
/// POST /instance  -> submit
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/instance", get(instance::form_page).post(instance::submit))
}
