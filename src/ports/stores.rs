//! Store Ports - Persistence Interfaces for Reference and Quote Data
//!
//! Defines the traits the usecases layer requires for rate cards,
//! ports, and quotes. All deletes are soft (active flag), and quote
//! replacement is version-checked so concurrent revisions surface as
//! conflicts instead of lost updates.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entity::{
    Port, PortId, PortKind, Quote, QuoteId, RateCard, RateCardId, TransitTime,
};
use crate::domain::error::QuoteError;

/// Admin patch for a rate card. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateCardPatch {
    pub country: Option<String>,
    pub trucking: Option<rust_decimal::Decimal>,
    pub docs: Option<rust_decimal::Decimal>,
    pub freight: Option<rust_decimal::Decimal>,
    pub othc: Option<rust_decimal::Decimal>,
    pub minimum_charge: Option<rust_decimal::Decimal>,
    pub currency: Option<String>,
    pub transit_time: Option<TransitTime>,
}

/// Admin patch for a port record. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortPatch {
    pub name: Option<String>,
    pub code: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<PortKind>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// One page of quote history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotePage {
    /// Quotes in this page, newest first.
    pub quotes: Vec<Quote>,
    /// Total quotes across all pages.
    pub total: usize,
    /// 1-based page number.
    pub page: usize,
    /// ceil(total / limit).
    pub pages: usize,
}

/// Trait for rate-card persistence providers.
///
/// The (country, mode, service) triple is unique among active cards;
/// `insert` enforces this at write time so lookups are never ambiguous.
#[async_trait]
pub trait RateCardStore: Send + Sync + 'static {
    /// Look up the single active card for a triple.
    async fn find_active(
        &self,
        country: &str,
        mode: crate::domain::TransportMode,
        service: crate::domain::ServiceKind,
    ) -> Result<Option<RateCard>, QuoteError>;

    /// List all active cards.
    async fn list_active(&self) -> Result<Vec<RateCard>, QuoteError>;

    /// Insert a new card; rejects a duplicate active triple.
    async fn insert(&self, card: RateCard) -> Result<RateCardId, QuoteError>;

    /// Apply an admin patch; returns the updated card.
    async fn update(&self, id: &str, patch: RateCardPatch) -> Result<RateCard, QuoteError>;

    /// Soft-delete: clears the active flag, never removes the record.
    async fn deactivate(&self, id: &str) -> Result<(), QuoteError>;

    /// Check if the store is usable (disk space, permissions).
    async fn is_healthy(&self) -> bool;
}

/// Trait for port-directory persistence providers.
#[async_trait]
pub trait PortStore: Send + Sync + 'static {
    /// Case-insensitive substring search over name/city/code/country of
    /// active ports, in insertion order, capped at `limit`.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Port>, QuoteError>;

    /// List all active ports.
    async fn list_active(&self) -> Result<Vec<Port>, QuoteError>;

    /// Fetch one port by id, active or not.
    async fn get(&self, id: &str) -> Result<Option<Port>, QuoteError>;

    /// Insert a new port record.
    async fn insert(&self, port: Port) -> Result<PortId, QuoteError>;

    /// Apply an admin patch; returns the updated port.
    async fn update(&self, id: &str, patch: PortPatch) -> Result<Port, QuoteError>;

    /// Soft-delete: clears the active flag and stamps deleted_at.
    async fn deactivate(&self, id: &str) -> Result<(), QuoteError>;

    /// Check if the store is usable.
    async fn is_healthy(&self) -> bool;
}

/// Trait for quote persistence providers.
#[async_trait]
pub trait QuoteStore: Send + Sync + 'static {
    /// Persist a freshly generated quote.
    async fn insert(&self, quote: Quote) -> Result<QuoteId, QuoteError>;

    /// Fetch one quote by id.
    async fn get(&self, id: &str) -> Result<Option<Quote>, QuoteError>;

    /// Replace a quote iff its stored version still equals
    /// `expected_version`. A mismatch is `QuoteError::Conflict`.
    async fn replace(
        &self,
        id: &str,
        expected_version: u64,
        quote: Quote,
    ) -> Result<Quote, QuoteError>;

    /// Paginated history, newest first.
    async fn history(&self, page: usize, limit: usize) -> Result<QuotePage, QuoteError>;

    /// Check if the store is usable.
    async fn is_healthy(&self) -> bool;
}
