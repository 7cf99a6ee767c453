//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (HTTP client, file I/O, HTTP server). Each
//! sub-module groups adapters by infrastructure concern.
//!
//! Adapter categories:
//! - `geocode`: Nominatim forward-geocoding client
//! - `http`: axum API surface for quotes, ports, and rate cards
//! - `metrics`: Prometheus metrics export and health state
//! - `persistence`: atomic-JSON document collections

pub mod geocode;
pub mod http;
pub mod metrics;
pub mod persistence;
