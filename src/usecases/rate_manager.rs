//! Rate Card Manager - Validated Tariff Administration
//!
//! Thin validated façade over the rate-card store: parses mode and
//! service strings into their closed enums, rejects negative amounts,
//! and delegates uniqueness enforcement to the store's write path.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::entity::{RateCard, ServiceKind, TransitTime, TransportMode};
use crate::domain::error::QuoteError;
use crate::ports::stores::{RateCardPatch, RateCardStore};

/// Fields required to create a rate card.
#[derive(Debug, Clone)]
pub struct NewRateCard {
    pub country: String,
    pub mode: String,
    pub service: String,
    pub trucking: Decimal,
    pub docs: Decimal,
    pub freight: Decimal,
    pub othc: Decimal,
    pub minimum_charge: Decimal,
    pub currency: String,
    pub transit_time: Option<TransitTime>,
}

/// Rate-card administration over the store port.
pub struct RateCardManager<R: RateCardStore> {
    store: Arc<R>,
}

impl<R: RateCardStore> RateCardManager<R> {
    /// Create a new manager.
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    /// List all active cards.
    pub async fn list_active(&self) -> Result<Vec<RateCard>, QuoteError> {
        self.store.list_active().await
    }

    /// Validate and create a card. The store rejects a second active
    /// card for the same (country, mode, service) triple.
    #[instrument(skip(self, draft), fields(country = %draft.country))]
    pub async fn create(&self, draft: NewRateCard) -> Result<RateCard, QuoteError> {
        if draft.country.trim().is_empty() {
            return Err(QuoteError::missing_field("country"));
        }
        let mode = TransportMode::parse(&draft.mode)?;
        let service = ServiceKind::parse(&draft.service)?;

        for (name, amount) in [
            ("trucking", draft.trucking),
            ("docs", draft.docs),
            ("freight", draft.freight),
            ("othc", draft.othc),
            ("minimum_charge", draft.minimum_charge),
        ] {
            if amount < Decimal::ZERO {
                return Err(QuoteError::Validation(format!("{name} must be >= 0")));
            }
        }

        let card = RateCard {
            id: Uuid::new_v4().to_string(),
            country: draft.country,
            mode,
            service,
            trucking: draft.trucking,
            docs: draft.docs,
            freight: draft.freight,
            othc: draft.othc,
            minimum_charge: draft.minimum_charge,
            currency: if draft.currency.trim().is_empty() {
                "USD".to_string()
            } else {
                draft.currency
            },
            transit_time: draft.transit_time,
            active: true,
            created_at: Utc::now(),
            updated_at: None,
        };

        let id = self.store.insert(card.clone()).await?;
        info!(card_id = %id, mode = %card.mode, service = %card.service, "Rate card created");
        Ok(card)
    }

    /// Apply an admin patch.
    pub async fn update(&self, id: &str, patch: RateCardPatch) -> Result<RateCard, QuoteError> {
        for amount in [
            patch.trucking,
            patch.docs,
            patch.freight,
            patch.othc,
            patch.minimum_charge,
        ]
        .into_iter()
        .flatten()
        {
            if amount < Decimal::ZERO {
                return Err(QuoteError::Validation(
                    "tariff components must be >= 0".to_string(),
                ));
            }
        }
        self.store.update(id, patch).await
    }

    /// Soft-delete a card.
    pub async fn deactivate(&self, id: &str) -> Result<(), QuoteError> {
        self.store.deactivate(id).await?;
        info!(card_id = %id, "Rate card deactivated");
        Ok(())
    }
}
