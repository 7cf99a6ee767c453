//! Geocoding Adapter - Nominatim Client
//!
//! Implements the Geocoder port against the Nominatim forward-geocoding
//! HTTP API with client-side rate limiting and bounded timeouts.
//!
//! Sub-modules:
//! - `nominatim`: rate-limited HTTP client implementing the port
//! - `types`: API response type definitions

pub mod nominatim;
pub mod types;

pub use nominatim::{NominatimConfig, NominatimGeocoder};
