//! HTTP API request/response shapes.
//!
//! Request bodies use Option fields plus explicit presence checks so a
//! missing field becomes a 400 with the exact field name, matching the
//! public API contract, instead of a generic deserialization error.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entity::{
    PortKind, PortSource, Quote, ServiceKind, ServiceQuote, TransitTime,
};
use crate::domain::error::QuoteError;
use crate::usecases::port_finder::{NewPort, PortMatch};
use crate::usecases::quote_engine::QuoteRequest;
use crate::usecases::rate_manager::NewRateCard;

fn require<T>(field: &'static str, value: Option<T>) -> Result<T, QuoteError> {
    value.ok_or_else(|| QuoteError::missing_field(field))
}

// ────────────────────────────────────────────
// Quotes
// ────────────────────────────────────────────

/// POST /quote body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuoteBody {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub commodity: Option<String>,
    pub container_max_weight: Option<f64>,
    pub container_quantity: Option<u32>,
    pub country: Option<String>,
    pub mode: Option<String>,
}

impl CreateQuoteBody {
    /// Check required fields and build the engine request.
    pub fn into_request(self) -> Result<QuoteRequest, QuoteError> {
        Ok(QuoteRequest {
            origin: require("origin", self.origin)?,
            destination: require("destination", self.destination)?,
            commodity: require("commodity", self.commodity)?,
            container_max_weight: require("containerMaxWeight", self.container_max_weight)?,
            container_quantity: require("containerQuantity", self.container_quantity)?,
            country: self.country,
            mode: self.mode,
        })
    }
}

/// POST /quote response.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteCreatedResponse {
    pub quote_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    pub chargeable_weight: f64,
    pub quotes: BTreeMap<ServiceKind, ServiceQuote>,
}

impl From<Quote> for QuoteCreatedResponse {
    fn from(quote: Quote) -> Self {
        Self {
            quote_id: quote.id,
            distance_km: quote.distance_km,
            chargeable_weight: quote.chargeable_weight,
            quotes: quote.quotes,
        }
    }
}

/// GET /quotes/history query params.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

// ────────────────────────────────────────────
// Ports
// ────────────────────────────────────────────

/// GET /finder_port/search query params.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// POST /finder_port body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePortBody {
    pub name: Option<String>,
    pub code: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<PortKind>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl CreatePortBody {
    /// Check required fields and build the finder draft.
    pub fn into_draft(self) -> Result<NewPort, QuoteError> {
        Ok(NewPort {
            name: require("name", self.name)?,
            code: self.code.unwrap_or_default(),
            country: require("country", self.country)?,
            city: self.city.unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            lat: require("lat", self.lat)?,
            lon: require("lon", self.lon)?,
        })
    }
}

/// One port search hit: a directory record or an external candidate.
#[derive(Debug, Clone, Serialize)]
pub struct PortHit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<PortKind>,
    pub lat: f64,
    pub lon: f64,
    pub source: PortSource,
}

impl From<PortMatch> for PortHit {
    fn from(hit: PortMatch) -> Self {
        match hit {
            PortMatch::Registered(port) => Self {
                id: Some(port.id),
                name: port.name,
                code: Some(port.code),
                country: Some(port.country),
                city: Some(port.city),
                kind: Some(port.kind),
                lat: port.lat,
                lon: port.lon,
                source: port.source,
            },
            PortMatch::External { name, coordinates } => Self {
                id: None,
                name,
                code: None,
                country: None,
                city: None,
                kind: None,
                lat: coordinates.lat,
                lon: coordinates.lon,
                source: PortSource::External,
            },
        }
    }
}

// ────────────────────────────────────────────
// Rate cards
// ────────────────────────────────────────────

/// POST /rate-cards body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRateCardBody {
    pub country: Option<String>,
    pub mode: Option<String>,
    pub service: Option<String>,
    #[serde(default)]
    pub trucking: Decimal,
    #[serde(default)]
    pub docs: Decimal,
    #[serde(default)]
    pub freight: Decimal,
    #[serde(default)]
    pub othc: Decimal,
    #[serde(default)]
    pub minimum_charge: Decimal,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub transit_time: Option<TransitTime>,
}

impl CreateRateCardBody {
    /// Check required fields and build the manager draft.
    pub fn into_draft(self) -> Result<NewRateCard, QuoteError> {
        Ok(NewRateCard {
            country: require("country", self.country)?,
            mode: require("mode", self.mode)?,
            service: require("service", self.service)?,
            trucking: self.trucking,
            docs: self.docs,
            freight: self.freight,
            othc: self.othc,
            minimum_charge: self.minimum_charge,
            currency: self.currency,
            transit_time: self.transit_time,
        })
    }
}
