//! Delivery-window estimation.
//!
//! Maps (distance, service, optional rate card) to a human-readable
//! ETA string. A rate card carrying an explicit transit-time window
//! always wins; otherwise a distance-banded fallback table applies.

use super::entity::{RateCard, ServiceKind};

/// Distance band (km) below which local deliveries are same-day.
const SAME_DAY_KM: f64 = 150.0;

/// Distance band (km) below which local deliveries take one day.
const ONE_DAY_KM: f64 = 400.0;

/// Estimate the delivery window for one priced service.
pub fn estimate_delivery(
    distance_km: f64,
    service: ServiceKind,
    rate_card: Option<&RateCard>,
) -> String {
    if let Some(tt) = rate_card.and_then(|card| card.transit_time.as_ref()) {
        return tt.format();
    }

    match service {
        ServiceKind::LocalCharge => {
            if distance_km < SAME_DAY_KM {
                "Same day".to_string()
            } else if distance_km < ONE_DAY_KM {
                "1 day".to_string()
            } else {
                "1–2 days".to_string()
            }
        }
        ServiceKind::Freight => "5–10 days".to_string(),
    }
}
