//! Distance Estimator - Place Resolution and Great-Circle Distance
//!
//! Resolves origin and destination independently via the Geocoder port
//! (single best match per call) and computes the great-circle distance
//! in kilometers, rounded to 2 decimal places. One attempt per
//! resolution — a geocoder failure degrades to a typed error, never a
//! retry loop.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::error::DistanceError;
use crate::domain::geo::{self, Coordinates};
use crate::ports::geocoder::{GeocodeOutcome, Geocoder};

/// Distance estimator over a geocoding provider.
pub struct DistanceEstimator<G: Geocoder> {
    /// Forward geocoder.
    geocoder: Arc<G>,
}

impl<G: Geocoder> DistanceEstimator<G> {
    /// Create an estimator backed by the given geocoder.
    pub fn new(geocoder: Arc<G>) -> Self {
        Self { geocoder }
    }

    /// Great-circle kilometers between two free-text place names.
    #[instrument(skip(self))]
    pub async fn between(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<f64, DistanceError> {
        let from = self.resolve(origin).await?;
        let to = self.resolve(destination).await?;

        let km = geo::round_km(geo::great_circle_km(from, to));
        debug!(origin, destination, km, "Distance resolved");
        Ok(km)
    }

    /// Resolve one place name to its best-match coordinates.
    async fn resolve(&self, place: &str) -> Result<Coordinates, DistanceError> {
        match self.geocoder.geocode(place, 1).await {
            GeocodeOutcome::Found(candidates) => candidates
                .first()
                .map(|p| p.coordinates)
                .ok_or_else(|| DistanceError::PlaceNotFound(place.to_string())),
            GeocodeOutcome::NoMatch => {
                Err(DistanceError::PlaceNotFound(place.to_string()))
            }
            GeocodeOutcome::Unavailable => Err(DistanceError::ServiceUnavailable),
        }
    }
}
