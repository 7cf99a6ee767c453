//! Configuration Module - TOML-based Service Configuration
//!
//! Loads and validates configuration from `config.toml`. Every field
//! carries a serde default, so a missing file yields a complete,
//! runnable configuration — endpoints, timeouts, and quoting defaults
//! are externalized here, nothing is hardcoded in the domain layer.

pub mod loader;

use serde::Deserialize;

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Service identity and logging.
    pub service: ServiceConfig,
    /// HTTP server binding.
    pub server: ServerConfig,
    /// External geocoder endpoint and limits.
    pub geocoder: GeocoderConfig,
    /// Defaults applied to quote requests.
    pub quoting: QuotingConfig,
    /// Document store location.
    pub persistence: PersistenceConfig,
}

/// Service identity configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Human-readable service name.
    pub name: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "freight-quoter".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for the API server.
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// External geocoder configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Base URL of the Nominatim instance.
    pub base_url: String,
    /// User-Agent header, required by the public instance.
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Outbound requests-per-second cap.
    pub max_requests_per_second: u32,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "freight-quoter/0.5 (port-finder)".to_string(),
            timeout_seconds: 10,
            max_requests_per_second: 1,
        }
    }
}

/// Defaults applied when a quote request omits country or mode.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuotingConfig {
    /// Rate-card country used when the request carries none.
    pub default_country: String,
    /// Transport mode used when the request carries none.
    pub default_mode: String,
}

impl Default for QuotingConfig {
    fn default() -> Self {
        Self {
            default_country: "KH".to_string(),
            default_mode: "road".to_string(),
        }
    }
}

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Directory for the JSON document collections.
    pub data_dir: String,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
        }
    }
}
