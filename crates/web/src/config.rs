use std::str::FromStr;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error(
        "REGISTRY_API_TIMEOUT_SECS ({registry}) must be shorter than REQUEST_TIMEOUT_SECS ({request})"
    )]
    TimeoutOrder { registry: u64, request: u64 },
}

/// Session cookie settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Mark the session cookie `Secure` (default: `false`).
    pub secure_cookie: bool,
    /// Inactivity period after which the session expires (default: `120`).
    pub idle_mins: i64,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Whole-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Fixed base URL of the registry API. When unset, the base is derived
    /// from the incoming request's scheme and host.
    pub registry_api_url: Option<String>,
    /// Timeout for calls to the registry API in seconds (default: `20`).
    /// Must be shorter than `request_timeout_secs`.
    pub registry_api_timeout_secs: u64,
    /// Honor `X-Forwarded-Proto` when deriving the registry base URL.
    pub trust_proxy_headers: bool,
    pub session: SessionConfig,
    /// Login directory: `name:argon2-phc-hash` entries separated by `;`.
    pub users: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default   |
    /// |-----------------------------|-----------|
    /// | `HOST`                      | `0.0.0.0` |
    /// | `PORT`                      | `3000`    |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`      |
    /// | `REGISTRY_API_URL`          | unset     |
    /// | `REGISTRY_API_TIMEOUT_SECS` | `20`      |
    /// | `TRUST_PROXY_HEADERS`       | `false`   |
    /// | `SESSION_SECURE_COOKIE`     | `false`   |
    /// | `SESSION_IDLE_MINS`         | `120`     |
    /// | `REGISTRY_USERS`            | empty     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", "u16", 3000)?;
        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", "u64", 30)?;

        let registry_api_url = lookup("REGISTRY_API_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());
        let registry_api_timeout_secs =
            parse_or(&lookup, "REGISTRY_API_TIMEOUT_SECS", "u64", 20)?;
        if registry_api_timeout_secs >= request_timeout_secs {
            return Err(ConfigError::TimeoutOrder {
                registry: registry_api_timeout_secs,
                request: request_timeout_secs,
            });
        }
        let trust_proxy_headers = parse_or(&lookup, "TRUST_PROXY_HEADERS", "bool", false)?;

        let session = SessionConfig {
            secure_cookie: parse_or(&lookup, "SESSION_SECURE_COOKIE", "bool", false)?,
            idle_mins: parse_or(&lookup, "SESSION_IDLE_MINS", "i64", 120)?,
        };

        let users = lookup("REGISTRY_USERS").unwrap_or_default();

        Ok(Self {
            host,
            port,
            request_timeout_secs,
            registry_api_url,
            registry_api_timeout_secs,
            trust_proxy_headers,
            session,
            users,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, expected: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.registry_api_url, None);
        assert_eq!(config.registry_api_timeout_secs, 20);
        assert!(config.registry_api_timeout_secs < config.request_timeout_secs);
        assert!(!config.trust_proxy_headers);
        assert!(!config.session.secure_cookie);
        assert_eq!(config.session.idle_mins, 120);
        assert!(config.users.is_empty());
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("REGISTRY_API_URL", "https://registry.example.org/"),
            ("TRUST_PROXY_HEADERS", "true"),
            ("SESSION_IDLE_MINS", "15"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.registry_api_url.as_deref(),
            Some("https://registry.example.org")
        );
        assert!(config.trust_proxy_headers);
        assert_eq!(config.session.idle_mins, 15);
    }

    #[test]
    fn blank_registry_url_means_derived() {
        let config = load(&[("REGISTRY_API_URL", "  ")]).unwrap();
        assert_eq!(config.registry_api_url, None);
    }

    #[test]
    fn registry_timeout_must_be_shorter_than_request_timeout() {
        assert_matches!(
            load(&[("REQUEST_TIMEOUT_SECS", "10"), ("REGISTRY_API_TIMEOUT_SECS", "10")]),
            Err(ConfigError::TimeoutOrder { registry: 10, request: 10 })
        );
        assert_matches!(
            load(&[("REGISTRY_API_TIMEOUT_SECS", "45")]),
            Err(ConfigError::TimeoutOrder { registry: 45, request: 30 })
        );

        let config = load(&[("REQUEST_TIMEOUT_SECS", "10"), ("REGISTRY_API_TIMEOUT_SECS", "9")])
            .unwrap();
        assert_eq!(config.registry_api_timeout_secs, 9);
    }

    #[test]
    fn invalid_port_is_reported() {
        assert_matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        );
    }
}
