//! Quote Engine - Quote Generation, Revision, and History
//!
//! The top-level quoting use case:
//! 1. Validates the request before any external call
//! 2. Resolves distance for modes that need it
//! 3. Looks up rate cards and prices each applicable service
//! 4. Estimates delivery windows
//! 5. Persists the assembled quote
//!
//! Revision is load → merge patch → full pure recompute → versioned
//! replace. Priced fields are never patched independently of a
//! recompute.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::entity::{Quote, ServiceQuote, TransportMode};
use crate::domain::error::QuoteError;
use crate::domain::{eta, pricing};
use crate::ports::geocoder::Geocoder;
use crate::ports::stores::{QuotePage, QuoteStore, RateCardStore};

use super::distance::DistanceEstimator;

/// Default page size for quote history.
const DEFAULT_HISTORY_LIMIT: usize = 20;

/// A validated-on-entry quote request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Free-text origin place name.
    pub origin: String,
    /// Free-text destination place name.
    pub destination: String,
    /// Commodity description.
    pub commodity: String,
    /// Max weight per container.
    pub container_max_weight: f64,
    /// Container count.
    pub container_quantity: u32,
    /// Rate-card country; engine default applies when absent.
    pub country: Option<String>,
    /// Transport mode string; engine default applies when absent.
    pub mode: Option<String>,
}

/// Partial revision of a stored quote. `None` fields keep the stored
/// value; pricing is always fully recomputed from the merged inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePatch {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub commodity: Option<String>,
    pub container_max_weight: Option<f64>,
    pub container_quantity: Option<u32>,
    pub country: Option<String>,
    pub mode: Option<String>,
}

impl QuotePatch {
    /// Whether the patch carries any change at all.
    pub fn is_empty(&self) -> bool {
        self.origin.is_none()
            && self.destination.is_none()
            && self.commodity.is_none()
            && self.container_max_weight.is_none()
            && self.container_quantity.is_none()
            && self.country.is_none()
            && self.mode.is_none()
    }
}

/// Defaults applied when a request omits country or mode.
#[derive(Debug, Clone)]
pub struct QuoteDefaults {
    pub country: String,
    pub mode: TransportMode,
}

/// Everything the pure pipeline derives for one request.
struct ComputedQuote {
    mode: TransportMode,
    country: String,
    distance_km: Option<f64>,
    chargeable_weight: f64,
    services: BTreeMap<crate::domain::ServiceKind, ServiceQuote>,
}

/// Quote engine orchestrating distance, rates, pricing, and persistence.
pub struct QuoteEngine<G: Geocoder, R: RateCardStore, Q: QuoteStore> {
    /// Distance estimator over the geocoder port.
    distance: DistanceEstimator<G>,
    /// Rate-card lookups.
    rate_cards: Arc<R>,
    /// Quote persistence.
    quotes: Arc<Q>,
    /// Request defaults from configuration.
    defaults: QuoteDefaults,
}

impl<G: Geocoder, R: RateCardStore, Q: QuoteStore> QuoteEngine<G, R, Q> {
    /// Create a new engine.
    pub fn new(
        geocoder: Arc<G>,
        rate_cards: Arc<R>,
        quotes: Arc<Q>,
        defaults: QuoteDefaults,
    ) -> Self {
        Self {
            distance: DistanceEstimator::new(geocoder),
            rate_cards,
            quotes,
            defaults,
        }
    }

    /// Generate, persist, and return a new quote.
    #[instrument(skip(self, request), fields(origin = %request.origin, destination = %request.destination))]
    pub async fn generate(&self, request: QuoteRequest) -> Result<Quote, QuoteError> {
        validate(&request)?;
        let computed = self.compute(&request).await?;

        let now = Utc::now();
        let quote = Quote {
            id: Uuid::new_v4().to_string(),
            origin: request.origin,
            destination: request.destination,
            commodity: request.commodity,
            mode: computed.mode,
            country: computed.country,
            distance_km: computed.distance_km,
            container_max_weight: request.container_max_weight,
            container_quantity: request.container_quantity,
            chargeable_weight: computed.chargeable_weight,
            quotes: computed.services,
            created_at: now,
            updated_at: None,
            converted: false,
            version: 1,
        };

        let id = self.quotes.insert(quote.clone()).await?;
        info!(
            quote_id = %id,
            mode = %quote.mode,
            services = quote.quotes.len(),
            "Quote generated"
        );
        Ok(quote)
    }

    /// Fetch a stored quote by id.
    pub async fn get(&self, id: &str) -> Result<Quote, QuoteError> {
        self.quotes
            .get(id)
            .await?
            .ok_or_else(|| QuoteError::not_found("Quote", id))
    }

    /// Revise a stored quote: merge the patch, recompute all priced
    /// fields from the merged inputs, and replace under version check.
    #[instrument(skip(self, patch), fields(quote_id = %id))]
    pub async fn update(&self, id: &str, patch: QuotePatch) -> Result<Quote, QuoteError> {
        if patch.is_empty() {
            return Err(QuoteError::Validation("No data provided".to_string()));
        }

        let current = self.get(id).await?;

        let request = QuoteRequest {
            origin: patch.origin.unwrap_or_else(|| current.origin.clone()),
            destination: patch
                .destination
                .unwrap_or_else(|| current.destination.clone()),
            commodity: patch.commodity.unwrap_or_else(|| current.commodity.clone()),
            container_max_weight: patch
                .container_max_weight
                .unwrap_or(current.container_max_weight),
            container_quantity: patch
                .container_quantity
                .unwrap_or(current.container_quantity),
            country: Some(patch.country.unwrap_or_else(|| current.country.clone())),
            mode: Some(patch.mode.unwrap_or_else(|| current.mode.to_string())),
        };

        validate(&request)?;
        let computed = self.compute(&request).await?;

        let revised = Quote {
            id: current.id.clone(),
            origin: request.origin,
            destination: request.destination,
            commodity: request.commodity,
            mode: computed.mode,
            country: computed.country,
            distance_km: computed.distance_km,
            container_max_weight: request.container_max_weight,
            container_quantity: request.container_quantity,
            chargeable_weight: computed.chargeable_weight,
            quotes: computed.services,
            created_at: current.created_at,
            updated_at: Some(Utc::now()),
            converted: current.converted,
            version: current.version + 1,
        };

        let stored = self.quotes.replace(id, current.version, revised).await?;
        info!(quote_id = %id, version = stored.version, "Quote revised");
        Ok(stored)
    }

    /// Paginated quote history, newest first.
    pub async fn history(
        &self,
        page: Option<usize>,
        limit: Option<usize>,
    ) -> Result<QuotePage, QuoteError> {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT).max(1);
        self.quotes.history(page, limit).await
    }

    /// The pure pipeline: distance → rate cards → pricing → ETA.
    async fn compute(&self, request: &QuoteRequest) -> Result<ComputedQuote, QuoteError> {
        let mode = match request.mode.as_deref() {
            Some(raw) => TransportMode::parse(raw)?,
            None => self.defaults.mode,
        };
        let country = request
            .country
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| self.defaults.country.clone());

        // Road quotes cannot exist without a resolved distance; sea
        // quotes never compute one.
        let distance_km = if mode.requires_distance() {
            let km = self
                .distance
                .between(&request.origin, &request.destination)
                .await
                .map_err(QuoteError::DistanceUnavailable)?;
            Some(km)
        } else {
            None
        };

        let chargeable_weight =
            Quote::chargeable_weight(request.container_max_weight, request.container_quantity);

        let mut services = BTreeMap::new();
        for &service in mode.services() {
            let Some(card) = self
                .rate_cards
                .find_active(&country, mode, service)
                .await?
            else {
                debug!(%country, %mode, %service, "No active rate card, skipping service");
                continue;
            };

            let Some(breakdown) = pricing::price(&card, request.container_quantity) else {
                warn!(card_id = %card.id, "Rate card pairing has no pricing formula");
                continue;
            };

            let eta = eta::estimate_delivery(
                distance_km.unwrap_or(0.0),
                service,
                Some(&card),
            );

            services.insert(
                service,
                ServiceQuote {
                    price: breakdown.total,
                    eta,
                    currency: card.currency.clone(),
                    breakdown,
                },
            );
        }

        if services.is_empty() {
            return Err(QuoteError::NoAvailableRates);
        }

        Ok(ComputedQuote {
            mode,
            country,
            distance_km,
            chargeable_weight,
            services,
        })
    }
}

/// Reject missing or malformed required fields before any side effect.
fn validate(request: &QuoteRequest) -> Result<(), QuoteError> {
    if request.origin.trim().is_empty() {
        return Err(QuoteError::missing_field("origin"));
    }
    if request.destination.trim().is_empty() {
        return Err(QuoteError::missing_field("destination"));
    }
    if request.commodity.trim().is_empty() {
        return Err(QuoteError::missing_field("commodity"));
    }
    if !(request.container_max_weight > 0.0) {
        return Err(QuoteError::missing_field("containerMaxWeight"));
    }
    if request.container_quantity == 0 {
        return Err(QuoteError::missing_field("containerQuantity"));
    }
    Ok(())
}
