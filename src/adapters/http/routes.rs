//! HTTP route handlers for the quoting API.
//!
//! Thin translation layer: parse the request shape, call the use case,
//! map the result. All business decisions live below this file.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use super::AppState;
use super::dto::{
    CreatePortBody, CreateQuoteBody, CreateRateCardBody, HistoryParams, PortHit,
    QuoteCreatedResponse, SearchParams,
};
use super::error::ApiError;
use crate::ports::stores::{PortPatch, RateCardPatch};
use crate::usecases::quote_engine::QuotePatch;

// ────────────────────────────────────────────
// Service status
// ────────────────────────────────────────────

/// GET /health — legacy status endpoint.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "message": "API is running" }))
}

/// GET /live — liveness probe, 200 while the process runs.
pub async fn liveness() -> impl IntoResponse {
    StatusCode::OK
}

/// GET /ready — readiness probe, 503 while draining or degraded.
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if state.health.is_ready() {
        (StatusCode::OK, "READY")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
    }
}

/// GET /metrics — Prometheus text exposition.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    state.metrics.render()
}

// ────────────────────────────────────────────
// Quotes
// ────────────────────────────────────────────

/// POST /quote — generate and persist a quote.
pub async fn create_quote(
    State(state): State<AppState>,
    Json(body): Json<CreateQuoteBody>,
) -> Result<Json<QuoteCreatedResponse>, ApiError> {
    let start = Instant::now();
    let request = body.into_request()?;

    match state.engine.generate(request).await {
        Ok(quote) => {
            let mode = quote.mode.to_string();
            state
                .metrics
                .quotes_generated
                .with_label_values(&[mode.as_str()])
                .inc();
            state
                .metrics
                .quote_latency_seconds
                .with_label_values(&[mode.as_str()])
                .observe(start.elapsed().as_secs_f64());
            Ok(Json(quote.into()))
        }
        Err(err) => {
            state
                .metrics
                .quote_failures
                .with_label_values(&[ApiError::reason(&err)])
                .inc();
            Err(err.into())
        }
    }
}

/// GET /quote/:id — fetch one quote.
pub async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = state.engine.get(&id).await?;
    Ok(Json(quote))
}

/// PUT /quote/:id — merge a patch and fully recompute.
pub async fn update_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<QuotePatch>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = state.engine.update(&id, patch).await?;
    Ok(Json(quote))
}

/// GET /quotes/history — paginated history, newest first.
pub async fn quote_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state.engine.history(params.page, params.limit).await?;
    Ok(Json(page))
}

// ────────────────────────────────────────────
// Port directory
// ────────────────────────────────────────────

/// GET /finder_port/search?q= — autocomplete with external fallback.
pub async fn search_ports(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let hits = state.finder.search(&params.q).await?;

    let source = match hits.first() {
        Some(crate::usecases::port_finder::PortMatch::Registered(_)) => "local",
        Some(crate::usecases::port_finder::PortMatch::External { .. }) => "external",
        None => "none",
    };
    state
        .metrics
        .port_searches
        .with_label_values(&[source])
        .inc();

    let hits: Vec<PortHit> = hits.into_iter().map(PortHit::from).collect();
    Ok(Json(hits))
}

/// GET /finder_port — list active ports.
pub async fn list_ports(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let ports = state.finder.list_active().await?;
    Ok(Json(ports))
}

/// GET /finder_port/:id — fetch one port.
pub async fn get_port(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let port = state.finder.get(&id).await?;
    Ok(Json(port))
}

/// POST /finder_port — create a port record.
pub async fn create_port(
    State(state): State<AppState>,
    Json(body): Json<CreatePortBody>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = body.into_draft()?;
    let port = state.finder.create(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": port.id, "message": "Port created successfully" })),
    ))
}

/// PUT /finder_port/:id — apply an admin patch.
pub async fn update_port(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<PortPatch>,
) -> Result<impl IntoResponse, ApiError> {
    state.finder.update(&id, patch).await?;
    Ok(Json(json!({ "message": "Port updated" })))
}

/// DELETE /finder_port/:id — soft-delete.
pub async fn delete_port(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.finder.deactivate(&id).await?;
    Ok(Json(json!({ "message": "Port deactivated" })))
}

// ────────────────────────────────────────────
// Rate cards
// ────────────────────────────────────────────

/// GET /rate-cards — list active cards.
pub async fn list_rate_cards(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let cards = state.rates.list_active().await?;
    Ok(Json(cards))
}

/// POST /rate-cards — create a card; duplicates of an active triple 409.
pub async fn create_rate_card(
    State(state): State<AppState>,
    Json(body): Json<CreateRateCardBody>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = body.into_draft()?;
    let card = state.rates.create(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": card.id, "message": "Rate card created" })),
    ))
}

/// PUT /rate-cards/:id — apply an admin patch.
pub async fn update_rate_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<RateCardPatch>,
) -> Result<impl IntoResponse, ApiError> {
    state.rates.update(&id, patch).await?;
    Ok(Json(json!({ "message": "Rate card updated" })))
}

/// DELETE /rate-cards/:id — soft-delete.
pub async fn delete_rate_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.rates.deactivate(&id).await?;
    Ok(Json(json!({ "message": "Rate card deactivated" })))
}
