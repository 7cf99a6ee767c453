//! Domain error → HTTP response mapping.
//!
//! One place decides status codes from the `QuoteError` taxonomy, so
//! handlers just bubble errors with `?`. Persistence details are
//! logged here and never leak to clients.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::domain::error::QuoteError;

/// Wrapper so `QuoteError` can be returned straight from handlers.
pub struct ApiError(pub QuoteError);

impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Stable label for failure-counter metrics.
    pub fn reason(err: &QuoteError) -> &'static str {
        match err {
            QuoteError::Validation(_) => "validation",
            QuoteError::NotFound { .. } => "not_found",
            QuoteError::UnsupportedMode(_) => "unsupported_mode",
            QuoteError::NoAvailableRates => "no_available_rates",
            QuoteError::DistanceUnavailable(_) => "distance_unavailable",
            QuoteError::DuplicateRateCard { .. } => "duplicate_rate_card",
            QuoteError::Conflict => "conflict",
            QuoteError::Persistence(_) => "persistence",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            QuoteError::Validation(_)
            | QuoteError::UnsupportedMode(_)
            | QuoteError::NoAvailableRates
            | QuoteError::DistanceUnavailable(_) => StatusCode::BAD_REQUEST,
            QuoteError::NotFound { .. } => StatusCode::NOT_FOUND,
            QuoteError::DuplicateRateCard { .. } | QuoteError::Conflict => {
                StatusCode::CONFLICT
            }
            QuoteError::Persistence(inner) => {
                error!(error = %inner, "Store failure surfaced to API");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_labels_are_stable() {
        assert_eq!(
            ApiError::reason(&QuoteError::NoAvailableRates),
            "no_available_rates"
        );
        assert_eq!(ApiError::reason(&QuoteError::Conflict), "conflict");
    }
}
