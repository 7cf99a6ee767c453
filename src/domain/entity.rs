//! Core freight-quoting domain types.
//!
//! Defines all business entities: rate cards, ports, quotes, and the
//! closed transport-mode/service enumerations that drive pricing dispatch.
//! These types are the foundation of the hexagonal architecture's inner ring.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::QuoteError;
use super::pricing::PriceBreakdown;

// ────────────────────────────────────────────
// Type aliases consumed by ports and adapters
// ────────────────────────────────────────────

/// Lightweight rate-card identifier used at the ports boundary.
pub type RateCardId = String;

/// Lightweight port identifier used at the ports boundary.
pub type PortId = String;

/// Lightweight quote identifier used at the ports boundary.
pub type QuoteId = String;

// ────────────────────────────────────────────
// Closed enumerations shared across layers
// ────────────────────────────────────────────

/// Supported transport modes.
///
/// This is a closed set: pricing dispatch exhaustively matches on
/// (mode, service), so adding a variant here is a compile error until
/// every formula site handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Door-to-door trucking.
    Road,
    /// Containerized ocean freight.
    Sea,
}

impl TransportMode {
    /// Parse a user-supplied mode string, case-normalized.
    ///
    /// Unknown input is an `UnsupportedMode` error — never a silent default.
    pub fn parse(input: &str) -> Result<Self, QuoteError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "road" => Ok(Self::Road),
            "sea" => Ok(Self::Sea),
            other => Err(QuoteError::UnsupportedMode(other.to_string())),
        }
    }

    /// The static set of services priced for this mode.
    pub fn services(self) -> &'static [ServiceKind] {
        match self {
            Self::Road => &[ServiceKind::LocalCharge],
            Self::Sea => &[ServiceKind::Freight],
        }
    }

    /// Whether quoting this mode requires a resolved geo-distance.
    pub fn requires_distance(self) -> bool {
        match self {
            Self::Road => true,
            Self::Sea => false,
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Road => write!(f, "road"),
            Self::Sea => write!(f, "sea"),
        }
    }
}

/// Priced service categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    /// Local trucking + documentation + terminal handling.
    LocalCharge,
    /// Per-container ocean freight.
    Freight,
}

impl ServiceKind {
    /// Parse a service name as stored on rate cards.
    pub fn parse(input: &str) -> Result<Self, QuoteError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "local_charge" => Ok(Self::LocalCharge),
            "freight" => Ok(Self::Freight),
            other => Err(QuoteError::Validation(format!("unknown service: {other}"))),
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LocalCharge => write!(f, "local_charge"),
            Self::Freight => write!(f, "freight"),
        }
    }
}

// ────────────────────────────────────────────
// Rate cards
// ────────────────────────────────────────────

/// Explicit transit-time window carried by a rate card.
///
/// When present it always takes precedence over the distance-banded
/// ETA fallback table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitTime {
    /// Lower bound of the window.
    pub min: u32,
    /// Upper bound of the window.
    pub max: u32,
    /// Unit label, e.g. "days".
    pub unit: String,
}

impl TransitTime {
    /// Human-readable window, e.g. "3–5 days".
    pub fn format(&self) -> String {
        format!("{}–{} {}", self.min, self.max, self.unit)
    }
}

/// A priced tariff template for a (country, mode, service) triple.
///
/// Exactly one *active* card may exist per triple; the store rejects
/// duplicate creates at write time. Deactivation is a soft flag so
/// historical quotes keep a valid lineage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateCard {
    /// Server-generated identifier.
    pub id: RateCardId,
    /// Country this tariff applies to.
    pub country: String,
    /// Transport mode.
    pub mode: TransportMode,
    /// Service category.
    pub service: ServiceKind,
    /// Trucking component.
    #[serde(default)]
    pub trucking: Decimal,
    /// Documentation fee component.
    #[serde(default)]
    pub docs: Decimal,
    /// Per-container freight rate.
    #[serde(default)]
    pub freight: Decimal,
    /// Origin terminal handling charge (flat per shipment).
    #[serde(default)]
    pub othc: Decimal,
    /// Tariff floor; billed totals never fall below it.
    #[serde(default)]
    pub minimum_charge: Decimal,
    /// ISO currency code for all components.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Optional explicit transit-time override for ETA.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transit_time: Option<TransitTime>,
    /// Soft-delete flag.
    pub active: bool,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
    /// Last admin update (UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_currency() -> String {
    "USD".to_string()
}

// ────────────────────────────────────────────
// Ports (locations, not hexagonal ports)
// ────────────────────────────────────────────

/// Port / terminal classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortKind {
    Sea,
    Air,
    Inland,
}

impl Default for PortKind {
    fn default() -> Self {
        Self::Sea
    }
}

/// Where a port record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortSource {
    /// Created by an admin.
    Manual,
    /// Harvested from the external geocoder.
    External,
}

/// A named location in the searchable port directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    /// Server-generated identifier.
    pub id: PortId,
    /// Display name.
    pub name: String,
    /// UN/LOCODE or carrier code, possibly empty.
    #[serde(default)]
    pub code: String,
    /// Country name.
    pub country: String,
    /// City, possibly empty.
    #[serde(default)]
    pub city: String,
    /// Terminal classification.
    #[serde(rename = "type", default)]
    pub kind: PortKind,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Record provenance.
    pub source: PortSource,
    /// Soft-delete flag.
    pub active: bool,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
    /// Last admin update (UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Deactivation timestamp (UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

// ────────────────────────────────────────────
// Quotes
// ────────────────────────────────────────────

/// One priced service line inside a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceQuote {
    /// Billed total after the minimum-charge floor.
    pub price: Decimal,
    /// Human-readable delivery window.
    pub eta: String,
    /// Currency of `price`, from the rate card.
    pub currency: String,
    /// Itemized breakdown including subtotal and floor flag.
    pub breakdown: PriceBreakdown,
}

/// A persisted freight quote.
///
/// The quote owns a snapshot of the pricing computed at creation or
/// update time — later rate-card changes never retroactively alter it.
/// `version` increases on every replace and backs the store's
/// compare-and-swap write, so concurrent revisions surface as conflicts
/// instead of lost updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Server-generated identifier.
    pub id: QuoteId,
    /// Free-text origin place name.
    pub origin: String,
    /// Free-text destination place name.
    pub destination: String,
    /// Commodity description.
    pub commodity: String,
    /// Transport mode the quote was priced for.
    pub mode: TransportMode,
    /// Country used for rate-card resolution.
    pub country: String,
    /// Great-circle distance in km; absent when the mode needs none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    /// Max weight per container, as submitted.
    pub container_max_weight: f64,
    /// Container count, as submitted.
    pub container_quantity: u32,
    /// Billable weight basis: max weight × quantity.
    pub chargeable_weight: f64,
    /// Priced services keyed by service name.
    pub quotes: BTreeMap<ServiceKind, ServiceQuote>,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
    /// Last revision timestamp (UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Whether the quote was converted into a booking.
    pub converted: bool,
    /// Optimistic-concurrency version for CAS replaces.
    pub version: u64,
}

impl Quote {
    /// Billable weight basis: max per-container weight × container count.
    ///
    /// No volumetric-weight comparison is performed.
    pub fn chargeable_weight(container_max_weight: f64, container_quantity: u32) -> f64 {
        container_max_weight * f64::from(container_quantity)
    }
}
