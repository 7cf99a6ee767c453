//! Nominatim Geocoder - Rate-limited Forward Geocoding Client
//!
//! Wraps reqwest against the public Nominatim search API. Every call
//! is bounded by the configured timeout and throttled client-side to
//! honor the service's requests-per-second usage policy. Transport
//! failures degrade to `GeocodeOutcome::Unavailable`; they are logged
//! here and never propagated as errors.

use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;
use tracing::{debug, instrument, warn};

use super::types::NominatimPlace;
use crate::ports::geocoder::{GeocodeOutcome, Geocoder, Place};

/// Configuration for the Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL of the Nominatim instance.
    pub base_url: String,
    /// User-Agent header, required by the public instance.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Outbound requests-per-second cap.
    pub max_requests_per_second: u32,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "freight-quoter/0.5 (port-finder)".to_string(),
            timeout: Duration::from_secs(10),
            max_requests_per_second: 1,
        }
    }
}

/// Rate-limited HTTP client for the Nominatim search API.
pub struct NominatimGeocoder {
    /// Underlying HTTP client.
    http: Client,
    /// Client configuration.
    config: NominatimConfig,
    /// Outbound request throttle.
    limiter: DefaultDirectRateLimiter,
}

impl NominatimGeocoder {
    /// Create a new geocoder client.
    pub fn new(config: NominatimConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;

        let rps = NonZeroU32::new(config.max_requests_per_second).unwrap_or(NonZeroU32::MIN);
        let limiter = RateLimiter::direct(Quota::per_second(rps));

        Ok(Self {
            http,
            config,
            limiter,
        })
    }

    /// Execute one search call and parse the candidate list.
    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<Place>> {
        let url = format!("{}/search", self.config.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("format", "jsonv2"),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await
            .context("Geocoding request failed")?
            .error_for_status()
            .context("Geocoding request rejected")?;

        let raw: Vec<NominatimPlace> = response
            .json()
            .await
            .context("Failed to parse geocoding response")?;

        Ok(raw.into_iter().filter_map(NominatimPlace::into_place).collect())
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self), fields(query = %query))]
    async fn geocode(&self, query: &str, limit: usize) -> GeocodeOutcome {
        self.limiter.until_ready().await;

        match self.fetch(query, limit).await {
            Ok(places) if places.is_empty() => {
                debug!(query, "Geocoder returned no candidates");
                GeocodeOutcome::NoMatch
            }
            Ok(places) => {
                debug!(query, candidates = places.len(), "Geocoder resolved query");
                GeocodeOutcome::Found(places)
            }
            Err(e) => {
                warn!(query, error = %e, "Geocoder unavailable");
                GeocodeOutcome::Unavailable
            }
        }
    }

    async fn is_healthy(&self) -> bool {
        let url = format!("{}/status", self.config.base_url);
        match self.http.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
