//! Configuration for the middleware chain

use serde::{Deserialize, Serialize};

pub mod loader;

pub use loader::{load_config, load_config_with_env};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// Authenticator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Session key the user identifier is stored under
    #[serde(default = "default_session_key")]
    pub session_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_key: default_session_key(),
        }
    }
}

/// Paginator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when the request does not ask for one
    #[serde(default = "default_page_size")]
    pub default_size: i64,

    /// Lower clamp bound for the page size
    #[serde(default = "default_min_size")]
    pub min_size: i64,

    /// Upper clamp bound for the page size
    #[serde(default = "default_max_size")]
    pub max_size: i64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_size: default_page_size(),
            min_size: default_min_size(),
            max_size: default_max_size(),
        }
    }
}

fn default_session_key() -> String {
    crate::middleware::DEFAULT_SESSION_KEY.to_string()
}

fn default_page_size() -> i64 {
    10
}

fn default_min_size() -> i64 {
    1
}

fn default_max_size() -> i64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.auth.session_key, "user_id");
        assert_eq!(config.pagination.default_size, 10);
        assert_eq!(config.pagination.min_size, 1);
        assert_eq!(config.pagination.max_size, 20);
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();

        assert_eq!(config.auth.session_key, "user_id");
        assert_eq!(config.pagination.max_size, 20);
    }

    #[test]
    fn test_partial_override() {
        let config: Config =
            serde_json::from_str(r#"{"pagination": {"max_size": 100}}"#).unwrap();

        assert_eq!(config.pagination.default_size, 10);
        assert_eq!(config.pagination.max_size, 100);
    }
}
