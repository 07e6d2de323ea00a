//! REST API client for the instance registry endpoints.
//!
//! Wraps `POST /service/instances` and `PUT /service/instances/{id}` using
//! [`reqwest`]. The registry reports its verdict in the body's `statusCode`
//! field, so the HTTP status line is logged but not used to decide success.

use std::time::Duration;

use registry_core::credential::ApiCredential;
use registry_core::instance::{InstanceDraft, InstanceTarget};
use reqwest::header::AUTHORIZATION;
use reqwest::Method;

use crate::response::ApiResponse;

/// HTTP client for the instance registry API.
///
/// The base URL is supplied per call because it may be derived from the
/// incoming request's host.
#[derive(Debug, Clone)]
pub struct RegistryApi {
    client: reqwest::Client,
}

/// Result of a submission the registry answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The registry reported `statusCode: 201`.
    Accepted,
    /// Any other status. Carries the registry's `friendlyMessage` (empty if absent).
    Rejected { message: String },
}

/// Errors from the registry REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum RegistryApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The registry answered with a body that is not a status envelope.
    #[error("Undecodable registry response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RegistryApi {
    /// Create a client whose calls give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, RegistryApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Create or update an instance on the registry.
    ///
    /// Makes exactly one call: `POST {base}/service/instances` for
    /// [`InstanceTarget::Create`], `PUT {base}/service/instances/{id}` for
    /// [`InstanceTarget::Update`]. The draft is sent as the JSON body and the
    /// credential as the `Authorization` header.
    pub async fn submit_instance(
        &self,
        base_url: &str,
        target: &InstanceTarget,
        draft: &InstanceDraft,
        credential: &ApiCredential,
    ) -> Result<SubmitOutcome, RegistryApiError> {
        let url = format!("{}{}", base_url.trim_end_matches('/'), target.path());
        let method = match target {
            InstanceTarget::Create => Method::POST,
            InstanceTarget::Update { .. } => Method::PUT,
        };
        tracing::debug!(%method, %url, "Submitting instance to registry");

        let response = self
            .client
            .request(method, &url)
            .header(AUTHORIZATION, credential.header_value())
            .json(draft)
            .send()
            .await?;

        let http_status = response.status();
        let body = response.bytes().await?;
        let envelope = ApiResponse::from_body(&body)?;

        if envelope.is_success() {
            tracing::info!(%url, "Registry accepted instance");
            return Ok(SubmitOutcome::Accepted);
        }

        let message = envelope.message();
        tracing::info!(
            %url,
            http_status = http_status.as_u16(),
            status_code = ?envelope.status_code(),
            %message,
            "Registry rejected instance"
        );
        Ok(SubmitOutcome::Rejected { message })
    }
}
