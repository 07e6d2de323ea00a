pub mod auth;
pub mod health;
pub mod home;
pub mod instance;

use axum::Router;

use crate::state::AppState;

/// Build the page route tree.
///
/// ```text
/// GET  /            home page (?success=1|2 shows a confirmation)
/// GET  /login       login form (redirects home when logged in)
/// POST /login       authenticate
/// GET  /logout      clear the session
/// GET  /instance    add/edit form (forbidden page when anonymous)
/// POST /instance    create, or update with _method=put
/// ```
pub fn site_routes() -> Router<AppState> {
    Router::new()
        .merge(home::router())
        .merge(auth::router())
        .merge(instance::router())
}
