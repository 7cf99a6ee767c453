//! Port Finder - Autocomplete Search and Directory Management
//!
//! Free-text port search over the local directory with an external
//! geocoder fallback, plus the admin lifecycle (create, update,
//! soft-delete) for port records.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::entity::{Port, PortKind, PortSource};
use crate::domain::error::QuoteError;
use crate::domain::geo::Coordinates;
use crate::ports::geocoder::{GeocodeOutcome, Geocoder};
use crate::ports::stores::{PortPatch, PortStore};

/// Queries shorter than this return nothing without touching any store.
pub const MIN_QUERY_LEN: usize = 2;

/// Cap on local directory matches.
const LOCAL_RESULT_CAP: usize = 10;

/// Cap on external fallback candidates.
const EXTERNAL_RESULT_CAP: usize = 5;

/// One search hit: either a directory record or an external candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum PortMatch {
    /// A port from the local directory.
    Registered(Port),
    /// A candidate harvested from the external geocoder.
    External {
        name: String,
        coordinates: Coordinates,
    },
}

/// Fields required to create a port record.
#[derive(Debug, Clone)]
pub struct NewPort {
    pub name: String,
    pub code: String,
    pub country: String,
    pub city: String,
    pub kind: PortKind,
    pub lat: f64,
    pub lon: f64,
}

/// Port directory search and administration.
pub struct PortFinder<G: Geocoder, P: PortStore> {
    /// External fallback geocoder.
    geocoder: Arc<G>,
    /// Local port directory.
    store: Arc<P>,
}

impl<G: Geocoder, P: PortStore> PortFinder<G, P> {
    /// Create a new finder.
    pub fn new(geocoder: Arc<G>, store: Arc<P>) -> Self {
        Self { geocoder, store }
    }

    /// Autocomplete search.
    ///
    /// Local matches win; only a completely empty local result falls
    /// back to the external geocoder, with the literal word "port"
    /// appended to bias candidates toward terminals.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<PortMatch>, QuoteError> {
        let query = query.trim();
        if query.len() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }

        let local = self.store.search(query, LOCAL_RESULT_CAP).await?;
        if !local.is_empty() {
            debug!(query, hits = local.len(), "Port search served locally");
            return Ok(local.into_iter().map(PortMatch::Registered).collect());
        }

        let external_query = format!("{query} port");
        match self.geocoder.geocode(&external_query, EXTERNAL_RESULT_CAP).await {
            GeocodeOutcome::Found(places) => {
                debug!(query, hits = places.len(), "Port search served externally");
                Ok(places
                    .into_iter()
                    .map(|p| PortMatch::External {
                        name: p.display_name,
                        coordinates: p.coordinates,
                    })
                    .collect())
            }
            GeocodeOutcome::NoMatch => Ok(Vec::new()),
            GeocodeOutcome::Unavailable => {
                // Autocomplete degrades to empty rather than erroring the UI.
                warn!(query, "Geocoder unavailable during port search fallback");
                Ok(Vec::new())
            }
        }
    }

    /// Fetch one port by id.
    pub async fn get(&self, id: &str) -> Result<Port, QuoteError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| QuoteError::not_found("Port", id))
    }

    /// List all active ports.
    pub async fn list_active(&self) -> Result<Vec<Port>, QuoteError> {
        self.store.list_active().await
    }

    /// Create a port record from admin input.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(&self, draft: NewPort) -> Result<Port, QuoteError> {
        if draft.name.trim().is_empty() {
            return Err(QuoteError::missing_field("name"));
        }
        if draft.country.trim().is_empty() {
            return Err(QuoteError::missing_field("country"));
        }
        let coordinates = Coordinates {
            lat: draft.lat,
            lon: draft.lon,
        };
        if !coordinates.is_valid() {
            return Err(QuoteError::Validation("lat/lon out of range".to_string()));
        }

        let port = Port {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            code: draft.code,
            country: draft.country,
            city: draft.city,
            kind: draft.kind,
            lat: draft.lat,
            lon: draft.lon,
            source: PortSource::Manual,
            active: true,
            created_at: Utc::now(),
            updated_at: None,
            deleted_at: None,
        };

        let id = self.store.insert(port.clone()).await?;
        info!(port_id = %id, "Port created");
        Ok(port)
    }

    /// Apply an admin patch.
    pub async fn update(&self, id: &str, patch: PortPatch) -> Result<Port, QuoteError> {
        if let (Some(lat), Some(lon)) = (patch.lat, patch.lon) {
            if !(Coordinates { lat, lon }).is_valid() {
                return Err(QuoteError::Validation("lat/lon out of range".to_string()));
            }
        }
        self.store.update(id, patch).await
    }

    /// Soft-delete a port record.
    pub async fn deactivate(&self, id: &str) -> Result<(), QuoteError> {
        self.store.deactivate(id).await?;
        info!(port_id = %id, "Port deactivated");
        Ok(())
    }
}
