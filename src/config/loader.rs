//! Configuration loader with environment variable support

use super::Config;
use crate::error::{GateError, Result};
use config::{Environment, File};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let config = config::Config::builder()
        .add_source(File::from(path.as_ref()))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Load configuration from a TOML file with environment variable overrides
pub fn load_config_with_env<P: AsRef<Path>>(path: P) -> Result<Config> {
    let config = config::Config::builder()
        .add_source(File::from(path.as_ref()))
        .add_source(
            Environment::with_prefix("REQUEST_GATE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Validate configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    if config.auth.session_key.is_empty() {
        return Err(GateError::Config(
            "Session key must not be empty".to_string(),
        ));
    }

    let pagination = &config.pagination;
    if pagination.min_size < 1 {
        return Err(GateError::Config(
            "Minimum page size must be at least 1".to_string(),
        ));
    }

    if pagination.min_size > pagination.max_size {
        return Err(GateError::Config(format!(
            "Minimum page size {} exceeds maximum {}",
            pagination.min_size, pagination.max_size
        )));
    }

    if pagination.default_size < pagination.min_size
        || pagination.default_size > pagination.max_size
    {
        return Err(GateError::Config(format!(
            "Default page size {} is outside [{}, {}]",
            pagination.default_size, pagination.min_size, pagination.max_size
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_defaults() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_empty_session_key() {
        let mut config = Config::default();
        config.auth.session_key = String::new();

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_inverted_bounds() {
        let mut config = Config::default();
        config.pagination.min_size = 30;
        config.pagination.max_size = 20;

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_default_outside_bounds() {
        let mut config = Config::default();
        config.pagination.default_size = 50;

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_min_size() {
        let mut config = Config::default();
        config.pagination.min_size = 0;

        assert!(validate_config(&config).is_err());
    }
}
