//! Handlers for the add/edit instance form.

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::header::HOST;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use registry_client::SubmitOutcome;
use registry_core::error::CoreError;
use registry_core::instance::InstanceForm;

use crate::config::ServerConfig;
use crate::error::AppResult;
use crate::middleware::session::CurrentUser;
use crate::state::AppState;
use crate::views::View;

/// Message shown when the registry API cannot be reached or answers garbage.
pub const REGISTRY_UNREACHABLE: &str =
    "The instance registry could not be reached. Please try again later.";

/// GET /instance
///
/// Show the add-instance form to logged-in users, the forbidden page otherwise.
pub async fn form_page(current: CurrentUser) -> View {
    match current.name() {
        Some(name) => View::add_instance(Some(name)),
        None => View::forbidden(None),
    }
}

/// POST /instance
///
/// Create an instance, or update one when the form carries `_method=put`.
/// Makes one registry call. On success redirects to the home page with the
/// matching notice; otherwise re-renders the form with every field echoed.
///
/// Identity is checked before the body is looked at, so anonymous callers get
/// the forbidden view whatever they send.
pub async fn submit(
    State(state): State<AppState>,
    current: CurrentUser,
    headers: HeaderMap,
    uri: Uri,
    form: Result<Form<InstanceForm>, FormRejection>,
) -> AppResult<Response> {
    let Some(user) = current.0 else {
        return Ok(View::forbidden(None).into_response());
    };
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return Ok(rejection.into_response()),
    };
    let user_name = Some(user.user.clone());

    let target = match form.target() {
        Ok(target) => target,
        Err(CoreError::Validation(msg)) => {
            let view = View::add_instance_echo(user_name, &form, msg);
            return Ok((StatusCode::BAD_REQUEST, view).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let base_url = registry_base_url(&state.config, &headers, &uri)?;
    let draft = form.to_draft();

    let outcome = state
        .registry
        .submit_instance(&base_url, &target, &draft, &user.credential)
        .await;

    match outcome {
        Ok(SubmitOutcome::Accepted) => {
            tracing::info!(
                user = %user.user,
                instance = %draft.name,
                path = %target.path(),
                "Instance saved"
            );
            Ok(Redirect::to(target.success_notice().redirect_path()).into_response())
        }
        Ok(SubmitOutcome::Rejected { message }) => {
            Ok(View::add_instance_echo(user_name, &form, message).into_response())
        }
        Err(err) => {
            tracing::warn!(error = %err, %base_url, "Registry call failed");
            let view =
                View::add_instance_echo(user_name, &form, REGISTRY_UNREACHABLE.to_string());
            Ok((StatusCode::BAD_GATEWAY, view).into_response())
        }
    }
}

/// Base URL of the registry API for this request.
///
/// A configured `REGISTRY_API_URL` wins. Otherwise the request's own host is
/// used, with the scheme taken from `X-Forwarded-Proto` when proxy headers
/// are trusted, then from the request URI, then `http`.
pub fn registry_base_url(
    config: &ServerConfig,
    headers: &HeaderMap,
    uri: &Uri,
) -> Result<String, CoreError> {
    if let Some(url) = &config.registry_api_url {
        return Ok(url.clone());
    }

    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .map(str::trim)
        .filter(|h| is_plain_host(h))
        .ok_or_else(|| CoreError::Validation("Request has no usable Host header".into()))?;

    let forwarded = if config.trust_proxy_headers {
        headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|s| matches!(*s, "http" | "https"))
    } else {
        None
    };
    let scheme = forwarded.or(uri.scheme_str()).unwrap_or("http");

    Ok(format!("{scheme}://{host}"))
}

/// A host (with optional port) and nothing else: no userinfo, path or query.
fn is_plain_host(host: &str) -> bool {
    !host.is_empty()
        && !host
            .chars()
            .any(|c| matches!(c, '/' | '@' | '?' | '#' | '\\') || c.is_whitespace())
}
