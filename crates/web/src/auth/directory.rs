//! Login directory loaded from configuration.
//!
//! Format: `name:phc-hash` entries separated by `;` or newlines, e.g.
//!
//! ```text
//! alice:$argon2id$v=19$m=19456,t=2,p=1$...;bob:$argon2id$...
//! ```

use std::collections::HashMap;

use registry_core::credential::ApiCredential;
use registry_core::error::CoreError;

use super::password::{is_valid_hash, verify_password};
use super::{Authenticator, SessionUser};

/// Login names mapped to their Argon2id hashes.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<String, String>,
}

impl UserDirectory {
    /// Parse a `name:hash` directory listing. Rejects malformed entries, invalid
    /// hashes and duplicate names.
    pub fn parse(listing: &str) -> Result<Self, CoreError> {
        let mut users = HashMap::new();

        for entry in listing.split([';', '\n']).map(str::trim).filter(|e| !e.is_empty()) {
            let (name, hash) = entry.split_once(':').ok_or_else(|| {
                CoreError::Validation(format!("User entry '{entry}' must be name:hash"))
            })?;
            let name = name.trim();
            let hash = hash.trim();

            if name.is_empty() {
                return Err(CoreError::Validation("User entry with empty name".into()));
            }
            if !is_valid_hash(hash) {
                return Err(CoreError::Validation(format!(
                    "User '{name}' has an invalid password hash"
                )));
            }
            if users.insert(name.to_string(), hash.to_string()).is_some() {
                return Err(CoreError::Validation(format!("User '{name}' is listed twice")));
            }
        }

        Ok(Self { users })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Authenticator for UserDirectory {
    fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<SessionUser>, CoreError> {
        let Some(hash) = self.users.get(username) else {
            return Ok(None);
        };

        let valid = verify_password(password, hash)
            .map_err(|e| CoreError::Internal(format!("Password verification error: {e}")))?;
        if !valid {
            return Ok(None);
        }

        Ok(Some(SessionUser {
            user: username.to_string(),
            credential: ApiCredential::basic(username, password),
        }))
    }
}
