//! HTTP Adapter - axum API Surface
//!
//! The thin HTTP boundary over the quoting usecases. Routes, DTOs, and
//! the error-to-status mapping live here; no pricing or persistence
//! logic does.
//!
//! Sub-modules:
//! - `dto`: request/response shapes with explicit required-field checks
//! - `error`: `QuoteError` → HTTP status mapping
//! - `routes`: handlers wiring requests to usecases

pub mod dto;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::adapters::geocode::NominatimGeocoder;
use crate::adapters::metrics::{HealthState, MetricsRegistry};
use crate::adapters::persistence::FileStore;
use crate::usecases::port_finder::PortFinder;
use crate::usecases::quote_engine::QuoteEngine;
use crate::usecases::rate_manager::RateCardManager;

/// Concrete engine wiring used by the HTTP surface.
pub type Engine = QuoteEngine<NominatimGeocoder, FileStore, FileStore>;

/// Concrete port finder wiring used by the HTTP surface.
pub type Finder = PortFinder<NominatimGeocoder, FileStore>;

/// Concrete rate-card admin wiring used by the HTTP surface.
pub type RateAdmin = RateCardManager<FileStore>;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    pub finder: Arc<Finder>,
    pub rates: Arc<RateAdmin>,
    pub metrics: Arc<MetricsRegistry>,
    pub health: HealthState,
}

/// Build the full API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Service status
        .route("/health", get(routes::health))
        .route("/live", get(routes::liveness))
        .route("/ready", get(routes::readiness))
        .route("/metrics", get(routes::metrics))
        // Quotes
        .route("/quote", axum::routing::post(routes::create_quote))
        .route(
            "/quote/:id",
            get(routes::get_quote).put(routes::update_quote),
        )
        .route("/quotes/history", get(routes::quote_history))
        // Port directory
        .route("/finder_port/search", get(routes::search_ports))
        .route(
            "/finder_port",
            get(routes::list_ports).post(routes::create_port),
        )
        .route(
            "/finder_port/:id",
            get(routes::get_port)
                .put(routes::update_port)
                .delete(routes::delete_port),
        )
        // Rate cards
        .route(
            "/rate-cards",
            get(routes::list_rate_cards).post(routes::create_rate_card),
        )
        .route(
            "/rate-cards/:id",
            axum::routing::put(routes::update_rate_card).delete(routes::delete_rate_card),
        )
        .with_state(state)
}
