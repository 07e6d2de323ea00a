//! Credential forwarded to the registry API on behalf of a logged-in user.
//!
//! The registry API authenticates with HTTP Basic auth. Instead of keeping the
//! user's plaintext password in the session, the verified credentials are
//! encoded once at login into the `Authorization` header value and only that
//! value travels with the session.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Pre-encoded `Authorization` header value for the registry API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiCredential(String);

impl ApiCredential {
    /// Encode a login name and password as an HTTP Basic credential.
    pub fn basic(user: &str, password: &str) -> Self {
        let encoded = STANDARD.encode(format!("{user}:{password}"));
        Self(format!("Basic {encoded}"))
    }

    /// The full header value, e.g. `Basic YWxpY2U6c2VjcmV0`.
    pub fn header_value(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = self.0.split(' ').next().unwrap_or_default();
        write!(f, "ApiCredential({scheme} <redacted>)")
    }
}
