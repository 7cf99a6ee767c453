//! Freight Quoter — Entry Point
//!
//! Initializes configuration, logging, the document stores, the
//! geocoder client, and the HTTP API. Runs until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate (defaults when absent)
//! 2. Init tracing (JSON structured logging)
//! 3. Open atomic-JSON document stores
//! 4. Create Nominatim geocoder (timeout + client-side rate cap)
//! 5. Build usecases (QuoteEngine, PortFinder, RateCardManager)
//! 6. Build metrics registry + health state
//! 7. Serve the axum API with graceful shutdown
//! 8. SIGINT → readiness 503 → drain → exit

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;

mod adapters;
mod config;
mod domain;
mod ports;
mod usecases;

use adapters::geocode::{NominatimConfig, NominatimGeocoder};
use adapters::http::{self, AppState};
use adapters::metrics::{HealthState, MetricsRegistry};
use adapters::persistence::FileStore;
use domain::entity::TransportMode;
use usecases::port_finder::PortFinder;
use usecases::quote_engine::{QuoteDefaults, QuoteEngine};
use usecases::rate_manager::RateCardManager;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config =
        config::loader::load_config("config.toml").context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(&config.service.log_level)
            }),
        )
        .json()
        .init();

    info!(
        name = %config.service.name,
        version = env!("CARGO_PKG_VERSION"),
        bind = %config.server.bind_address,
        "Starting freight quoter"
    );

    // ── 3. Open document stores ─────────────────────────────
    let store = Arc::new(
        FileStore::from_data_dir(&config.persistence.data_dir)
            .await
            .context("Failed to open document stores")?,
    );

    // ── 4. Create geocoder client ───────────────────────────
    let geocoder = Arc::new(
        NominatimGeocoder::new(NominatimConfig {
            base_url: config.geocoder.base_url.clone(),
            user_agent: config.geocoder.user_agent.clone(),
            timeout: Duration::from_secs(config.geocoder.timeout_seconds),
            max_requests_per_second: config.geocoder.max_requests_per_second,
        })
        .context("Failed to create geocoder client")?,
    );

    // ── 5. Build usecases ───────────────────────────────────
    let defaults = QuoteDefaults {
        country: config.quoting.default_country.clone(),
        // Validated by the loader, so this parse cannot fail here.
        mode: TransportMode::parse(&config.quoting.default_mode)
            .context("Invalid default mode")?,
    };

    let engine = Arc::new(QuoteEngine::new(
        Arc::clone(&geocoder),
        Arc::clone(&store),
        Arc::clone(&store),
        defaults,
    ));
    let finder = Arc::new(PortFinder::new(Arc::clone(&geocoder), Arc::clone(&store)));
    let rates = Arc::new(RateCardManager::new(Arc::clone(&store)));

    // ── 6. Metrics + health state ───────────────────────────
    let metrics = Arc::new(MetricsRegistry::new().context("Failed to build metrics registry")?);
    let health = HealthState::new();

    // Periodic store probe feeding the readiness endpoint.
    let probe_store = Arc::clone(&store);
    let probe_health = health.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30));
        loop {
            interval.tick().await;
            let healthy =
                ports::stores::QuoteStore::is_healthy(probe_store.as_ref()).await;
            probe_health.set_stores_healthy(healthy);
        }
    });

    // ── 7. Serve the API ────────────────────────────────────
    let state = AppState {
        engine,
        finder,
        rates,
        metrics,
        health: health.clone(),
    };
    let app = http::router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_address))?;
    info!(address = %config.server.bind_address, "API server listening");

    let shutdown_health = health.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = signal::ctrl_c().await;
            info!("SIGINT received, initiating graceful shutdown");
            // Readiness probe flips to 503 while in-flight requests drain.
            shutdown_health.begin_shutdown();
        })
        .await
        .context("API server failed")?;

    info!("Shutdown complete");
    Ok(())
}
