//! Geocoder Port - Forward Geocoding Interface
//!
//! Defines the trait for resolving free-text place names to coordinate
//! candidates via an external service. The outcome is a closed tagged
//! enum so callers can tell "no such place" from "service down" —
//! neither is ever coerced into the other or into an empty list.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::geo::Coordinates;

/// One geocoding candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Full display name returned by the service.
    pub display_name: String,
    /// Resolved coordinates.
    pub coordinates: Coordinates,
}

/// Result of a forward-geocoding call.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    /// One or more candidates, best match first.
    Found(Vec<Place>),
    /// The service answered but knows no such place.
    NoMatch,
    /// The service was unreachable or timed out.
    Unavailable,
}

/// Trait for forward-geocoding providers.
///
/// Implementors wrap an external address-resolution service. Calls are
/// at-most-once per resolution: transport failures degrade to
/// `Unavailable`, never to a retry loop or a panic.
#[async_trait]
pub trait Geocoder: Send + Sync + 'static {
    /// Resolve a free-text query to up to `limit` candidates.
    async fn geocode(&self, query: &str, limit: usize) -> GeocodeOutcome;

    /// Check if the upstream service is reachable.
    async fn is_healthy(&self) -> bool;
}
