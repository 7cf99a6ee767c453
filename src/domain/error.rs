//! Domain error taxonomy.
//!
//! Every failure the quoting pipeline can surface, as a closed enum so
//! the HTTP boundary maps variants to status codes instead of pattern
//! matching on message strings. Adapters wrap their internals in
//! `Persistence`; everything else is a typed business outcome.

use thiserror::Error;

/// Failures surfaced by the quoting core.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Missing or malformed required input. Rejected before side effects.
    /// Carries the full client-facing message, e.g. "Missing field: origin".
    #[error("{0}")]
    Validation(String),

    /// Unknown entity id.
    #[error("{entity} not found")]
    NotFound {
        entity: &'static str,
        id: String,
    },

    /// Transport mode outside the closed pricing set.
    #[error("Unsupported transport mode")]
    UnsupportedMode(String),

    /// No service produced a price for the request.
    #[error("No available rates")]
    NoAvailableRates,

    /// Origin or destination could not be resolved to coordinates.
    #[error("Unable to calculate distance")]
    DistanceUnavailable(#[source] DistanceError),

    /// A create would leave two active cards for one triple.
    #[error("active rate card already exists for {country}/{mode}/{service}")]
    DuplicateRateCard {
        country: String,
        mode: String,
        service: String,
    },

    /// A versioned replace lost a concurrent-update race.
    #[error("quote was modified concurrently")]
    Conflict,

    /// Store read/write failure. Opaque to callers, logged at the source.
    #[error("storage failure")]
    Persistence(anyhow::Error),
}

impl From<anyhow::Error> for QuoteError {
    fn from(err: anyhow::Error) -> Self {
        Self::Persistence(err)
    }
}

impl QuoteError {
    /// Shorthand for a typed not-found.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Shorthand for a missing required field.
    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("Missing field: {field}"))
    }
}

/// Why a distance could not be computed.
///
/// Kept distinct so callers can word "no such place" differently from
/// "geocoding service is down".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistanceError {
    /// The geocoder returned zero candidates for this place name.
    #[error("no match for place: {0}")]
    PlaceNotFound(String),

    /// The geocoder was unreachable or timed out.
    #[error("geocoding service unavailable")]
    ServiceUnavailable,
}
