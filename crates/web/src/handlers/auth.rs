//! Handlers for login and logout.

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::AppResult;
use crate::middleware::session::{sign_in, sign_out, CurrentUser};
use crate::state::AppState;
use crate::views::View;

/// Form body for `POST /login`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// GET /login
///
/// Show the login form to anonymous visitors; send logged-in users home.
pub async fn login_page(current: CurrentUser) -> Response {
    match current.0 {
        Some(_) => Redirect::to("/").into_response(),
        None => View::login(None).into_response(),
    }
}

/// POST /login
///
/// Verify the credentials. Success stores the identity and redirects home;
/// any failure redirects back to the login form without detail.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(input): Form<LoginForm>,
) -> AppResult<Redirect> {
    let user = state
        .authenticator
        .authenticate(&input.username, &input.password)?;

    let Some(user) = user else {
        tracing::info!(username = %input.username, "Login rejected");
        return Ok(Redirect::to("/login"));
    };

    sign_in(&session, &user).await?;
    tracing::info!(user = %user.user, "User logged in");
    Ok(Redirect::to("/"))
}

/// GET /logout
///
/// Clear the session unconditionally and redirect home.
pub async fn logout(current: CurrentUser, session: Session) -> AppResult<Redirect> {
    sign_out(&session).await?;
    if let Some(user) = current.0 {
        tracing::info!(user = %user.user, "User logged out");
    }
    Ok(Redirect::to("/"))
}
