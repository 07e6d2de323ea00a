//! Session-backed identity.
//!
//! The session layer keeps one record per browser cookie. A logged-in user is
//! stored under [`SESSION_USER_KEY`]; its absence means anonymous. Handlers
//! receive the identity as an explicit [`CurrentUser`] extractor value.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tower_sessions::cookie::time::Duration;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::auth::SessionUser;
use crate::config::SessionConfig;
use crate::error::{AppError, AppResult};

/// Session key holding the serialized [`SessionUser`].
pub const SESSION_USER_KEY: &str = "registry.user";

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "registry.sid";

/// The user logged in for this request, or `None` for anonymous requests.
///
/// ```ignore
/// async fn page(CurrentUser(user): CurrentUser) -> View {
///     View::index(user.map(|u| u.user), None)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<SessionUser>);

impl CurrentUser {
    /// Login name for the page header.
    pub fn name(&self) -> Option<String> {
        self.0.as_ref().map(|u| u.user.clone())
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::InternalError(msg.to_string()))?;
        let user = session.get::<SessionUser>(SESSION_USER_KEY).await?;
        Ok(CurrentUser(user))
    }
}

/// Store `user` as the session identity, rotating the session id first.
pub async fn sign_in(session: &Session, user: &SessionUser) -> AppResult<()> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_KEY, user).await?;
    Ok(())
}

/// Drop the session and its identity.
pub async fn sign_out(session: &Session) -> AppResult<()> {
    session.flush().await?;
    Ok(())
}

/// Build the session layer backed by an in-memory store.
pub fn build_session_layer(config: &SessionConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_secure(config.secure_cookie)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(config.idle_mins)))
}
