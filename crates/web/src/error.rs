use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use registry_core::error::CoreError;

use crate::views::View;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds web-specific variants.
/// Implements [`IntoResponse`] by rendering the error page.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `registry_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The session store failed to load or save.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// A template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const GENERIC_MESSAGE: &str = "An internal error occurred";

impl AppError {
    /// HTTP status and user-facing message. Internal details are logged,
    /// never shown.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_MESSAGE.to_string())
                }
            },
            AppError::Session(err) => {
                tracing::error!(error = %err, "Session store error");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_MESSAGE.to_string())
            }
            AppError::Template(err) => {
                tracing::error!(error = %err, "Template render error");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_MESSAGE.to_string())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_MESSAGE.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        match View::error(None, message.clone()).render() {
            Ok(html) => (status, Html(html)).into_response(),
            // The error page itself failed; fall back to plain text.
            Err(e) => {
                tracing::error!(error = %e, "Error page render failed");
                (status, message).into_response()
            }
        }
    }
}
