//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters, and
//! providing clear error messages for misconfiguration. A missing file
//! is not an error: defaults describe a complete local setup.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::entity::TransportMode;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - The file exists but can't be read or parsed
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
    let path = Path::new(path);

    let config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content).with_context(|| "Failed to parse config.toml")?
    } else {
        info!(path = %path.display(), "No config file found, using defaults");
        AppConfig::default()
    };

    validate_config(&config)?;

    info!(
        bind = %config.server.bind_address,
        geocoder = %config.geocoder.base_url,
        default_country = %config.quoting.default_country,
        default_mode = %config.quoting.default_mode,
        "Configuration loaded successfully"
    );

    Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
    anyhow::ensure!(
        !config.server.bind_address.is_empty(),
        "server.bind_address must not be empty"
    );
    anyhow::ensure!(
        config
            .server
            .bind_address
            .parse::<std::net::SocketAddr>()
            .is_ok(),
        "server.bind_address is not a valid socket address: {}",
        config.server.bind_address
    );

    anyhow::ensure!(
        !config.geocoder.base_url.is_empty(),
        "geocoder.base_url must not be empty"
    );
    anyhow::ensure!(
        !config.geocoder.user_agent.is_empty(),
        "geocoder.user_agent must not be empty"
    );
    anyhow::ensure!(
        config.geocoder.timeout_seconds > 0,
        "geocoder.timeout_seconds must be positive, got {}",
        config.geocoder.timeout_seconds
    );
    anyhow::ensure!(
        config.geocoder.max_requests_per_second > 0,
        "geocoder.max_requests_per_second must be positive"
    );

    anyhow::ensure!(
        !config.quoting.default_country.is_empty(),
        "quoting.default_country must not be empty"
    );
    TransportMode::parse(&config.quoting.default_mode).map_err(|_| {
        anyhow::anyhow!(
            "quoting.default_mode is not a supported mode: {}",
            config.quoting.default_mode
        )
    })?;

    anyhow::ensure!(
        !config.persistence.data_dir.is_empty(),
        "persistence.data_dir must not be empty"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_config("definitely-not-here.toml").unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.quoting.default_country, "KH");
    }

    #[test]
    fn test_defaults_validate() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_bad_default_mode_rejected() {
        let mut config = AppConfig::default();
        config.quoting.default_mode = "teleport".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config.geocoder.timeout_seconds = 0;
        assert!(validate_config(&config).is_err());
    }
}
