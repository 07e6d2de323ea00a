//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`directory`] -- the configured login directory.
//!
//! [`Authenticator`] is the seam between the login handler and whatever
//! checks credentials; [`directory::UserDirectory`] is the production one.

pub mod directory;
pub mod password;

use registry_core::credential::ApiCredential;
use registry_core::error::CoreError;
use serde::{Deserialize, Serialize};

/// Identity stored in the session after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Login name.
    pub user: String,
    /// Credential forwarded to the registry API on this user's behalf.
    pub credential: ApiCredential,
}

/// Verifies login credentials.
pub trait Authenticator: Send + Sync {
    /// Returns the session identity for valid credentials, `Ok(None)` for
    /// invalid ones, and `Err` only when verification itself could not run.
    fn authenticate(&self, username: &str, password: &str)
        -> Result<Option<SessionUser>, CoreError>;
}
