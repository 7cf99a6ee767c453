//! File Store - Concrete Adapter for the Store Ports
//!
//! Implements `RateCardStore`, `PortStore`, and `QuoteStore` over three
//! atomic-JSON collections. This is the hexagonal architecture glue:
//! the usecases layer only knows the store traits, never files or JSON.
//!
//! Write-path invariants live here: a create that would leave two
//! active rate cards for one (country, mode, service) triple is
//! rejected, and quote replacement is compare-and-swap on the stored
//! version.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

use super::collection::JsonCollection;
use crate::domain::entity::{
    Port, PortId, Quote, QuoteId, RateCard, RateCardId, ServiceKind, TransportMode,
};
use crate::domain::error::QuoteError;
use crate::ports::stores::{
    PortPatch, PortStore, QuotePage, QuoteStore, RateCardPatch, RateCardStore,
};

/// Concrete store adapter over atomic-JSON collections.
pub struct FileStore {
    rate_cards: JsonCollection<RateCard>,
    ports: JsonCollection<Port>,
    quotes: JsonCollection<Quote>,
}

impl FileStore {
    /// Open all collections in the given data directory.
    pub async fn from_data_dir(data_dir: &str) -> Result<Self> {
        Ok(Self {
            rate_cards: JsonCollection::open(data_dir, "rate_cards").await?,
            ports: JsonCollection::open(data_dir, "ports").await?,
            quotes: JsonCollection::open(data_dir, "quotes").await?,
        })
    }
}

#[async_trait]
impl RateCardStore for FileStore {
    async fn find_active(
        &self,
        country: &str,
        mode: TransportMode,
        service: ServiceKind,
    ) -> Result<Option<RateCard>, QuoteError> {
        Ok(self
            .rate_cards
            .read(|cards| {
                cards
                    .iter()
                    .find(|c| {
                        c.active
                            && c.country == country
                            && c.mode == mode
                            && c.service == service
                    })
                    .cloned()
            })
            .await)
    }

    async fn list_active(&self) -> Result<Vec<RateCard>, QuoteError> {
        Ok(self
            .rate_cards
            .read(|cards| cards.iter().filter(|c| c.active).cloned().collect())
            .await)
    }

    async fn insert(&self, card: RateCard) -> Result<RateCardId, QuoteError> {
        let id = card.id.clone();
        self.rate_cards
            .mutate(|cards| {
                let duplicate = cards.iter().any(|c| {
                    c.active
                        && c.country == card.country
                        && c.mode == card.mode
                        && c.service == card.service
                });
                if duplicate {
                    return Err(QuoteError::DuplicateRateCard {
                        country: card.country.clone(),
                        mode: card.mode.to_string(),
                        service: card.service.to_string(),
                    });
                }
                cards.push(card);
                Ok(())
            })
            .await??;
        Ok(id)
    }

    async fn update(&self, id: &str, patch: RateCardPatch) -> Result<RateCard, QuoteError> {
        self.rate_cards
            .mutate(|cards| {
                let card = cards
                    .iter_mut()
                    .find(|c| c.id == id)
                    .ok_or_else(|| QuoteError::not_found("Rate card", id))?;

                if let Some(country) = patch.country {
                    card.country = country;
                }
                if let Some(trucking) = patch.trucking {
                    card.trucking = trucking;
                }
                if let Some(docs) = patch.docs {
                    card.docs = docs;
                }
                if let Some(freight) = patch.freight {
                    card.freight = freight;
                }
                if let Some(othc) = patch.othc {
                    card.othc = othc;
                }
                if let Some(minimum_charge) = patch.minimum_charge {
                    card.minimum_charge = minimum_charge;
                }
                if let Some(currency) = patch.currency {
                    card.currency = currency;
                }
                if let Some(transit_time) = patch.transit_time {
                    card.transit_time = Some(transit_time);
                }
                card.updated_at = Some(Utc::now());
                Ok(card.clone())
            })
            .await?
    }

    async fn deactivate(&self, id: &str) -> Result<(), QuoteError> {
        self.rate_cards
            .mutate(|cards| {
                let card = cards
                    .iter_mut()
                    .find(|c| c.id == id)
                    .ok_or_else(|| QuoteError::not_found("Rate card", id))?;
                card.active = false;
                card.updated_at = Some(Utc::now());
                Ok(())
            })
            .await?
    }

    async fn is_healthy(&self) -> bool {
        self.rate_cards.is_healthy().await
    }
}

#[async_trait]
impl PortStore for FileStore {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Port>, QuoteError> {
        let needle = query.to_lowercase();
        Ok(self
            .ports
            .read(|ports| {
                ports
                    .iter()
                    .filter(|p| p.active)
                    .filter(|p| {
                        p.name.to_lowercase().contains(&needle)
                            || p.city.to_lowercase().contains(&needle)
                            || p.code.to_lowercase().contains(&needle)
                            || p.country.to_lowercase().contains(&needle)
                    })
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .await)
    }

    async fn list_active(&self) -> Result<Vec<Port>, QuoteError> {
        Ok(self
            .ports
            .read(|ports| ports.iter().filter(|p| p.active).cloned().collect())
            .await)
    }

    async fn get(&self, id: &str) -> Result<Option<Port>, QuoteError> {
        Ok(self
            .ports
            .read(|ports| ports.iter().find(|p| p.id == id).cloned())
            .await)
    }

    async fn insert(&self, port: Port) -> Result<PortId, QuoteError> {
        let id = port.id.clone();
        self.ports.mutate(|ports| ports.push(port)).await?;
        Ok(id)
    }

    async fn update(&self, id: &str, patch: PortPatch) -> Result<Port, QuoteError> {
        self.ports
            .mutate(|ports| {
                let port = ports
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| QuoteError::not_found("Port", id))?;

                if let Some(name) = patch.name {
                    port.name = name;
                }
                if let Some(code) = patch.code {
                    port.code = code;
                }
                if let Some(country) = patch.country {
                    port.country = country;
                }
                if let Some(city) = patch.city {
                    port.city = city;
                }
                if let Some(kind) = patch.kind {
                    port.kind = kind;
                }
                if let Some(lat) = patch.lat {
                    port.lat = lat;
                }
                if let Some(lon) = patch.lon {
                    port.lon = lon;
                }
                port.updated_at = Some(Utc::now());
                Ok(port.clone())
            })
            .await?
    }

    async fn deactivate(&self, id: &str) -> Result<(), QuoteError> {
        self.ports
            .mutate(|ports| {
                let port = ports
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| QuoteError::not_found("Port", id))?;
                port.active = false;
                port.deleted_at = Some(Utc::now());
                Ok(())
            })
            .await?
    }

    async fn is_healthy(&self) -> bool {
        self.ports.is_healthy().await
    }
}

#[async_trait]
impl QuoteStore for FileStore {
    async fn insert(&self, quote: Quote) -> Result<QuoteId, QuoteError> {
        let id = quote.id.clone();
        self.quotes.mutate(|quotes| quotes.push(quote)).await?;
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<Quote>, QuoteError> {
        Ok(self
            .quotes
            .read(|quotes| quotes.iter().find(|q| q.id == id).cloned())
            .await)
    }

    async fn replace(
        &self,
        id: &str,
        expected_version: u64,
        quote: Quote,
    ) -> Result<Quote, QuoteError> {
        self.quotes
            .mutate(|quotes| {
                let slot = quotes
                    .iter_mut()
                    .find(|q| q.id == id)
                    .ok_or_else(|| QuoteError::not_found("Quote", id))?;
                if slot.version != expected_version {
                    return Err(QuoteError::Conflict);
                }
                *slot = quote.clone();
                Ok(quote)
            })
            .await?
    }

    async fn history(&self, page: usize, limit: usize) -> Result<QuotePage, QuoteError> {
        Ok(self
            .quotes
            .read(|quotes| {
                let mut ordered: Vec<Quote> = quotes.to_vec();
                ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

                let total = ordered.len();
                let pages = total.div_ceil(limit);
                let quotes = ordered
                    .into_iter()
                    .skip((page - 1) * limit)
                    .take(limit)
                    .collect();

                QuotePage {
                    quotes,
                    total,
                    page,
                    pages,
                }
            })
            .await)
    }

    async fn is_healthy(&self) -> bool {
        self.quotes.is_healthy().await
    }
}
