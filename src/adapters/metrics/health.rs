//! Health Probes - Liveness and Readiness State
//!
//! Shared health state behind the /live and /ready endpoints for
//! container health checks. Readiness drops during graceful shutdown
//! or when the backing stores stop being writable.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared health state polled by readiness probes.
#[derive(Debug, Clone)]
pub struct HealthState {
    /// Whether the stores are writable.
    stores_healthy: Arc<AtomicBool>,
    /// Whether the service is accepting traffic (false while draining).
    accepting: Arc<AtomicBool>,
}

impl HealthState {
    /// Create a new health state (healthy and accepting by default).
    pub fn new() -> Self {
        Self {
            stores_healthy: Arc::new(AtomicBool::new(true)),
            accepting: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Record store health from a periodic probe.
    pub fn set_stores_healthy(&self, healthy: bool) {
        self.stores_healthy.store(healthy, Ordering::Relaxed);
    }

    /// Flip to draining: readiness goes 503 while in-flight work ends.
    pub fn begin_shutdown(&self) {
        self.accepting.store(false, Ordering::Relaxed);
    }

    /// Check if the system is ready to serve traffic.
    pub fn is_ready(&self) -> bool {
        self.accepting.load(Ordering::Relaxed)
            && self.stores_healthy.load(Ordering::Relaxed)
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_by_default() {
        assert!(HealthState::new().is_ready());
    }

    #[test]
    fn test_shutdown_drops_readiness() {
        let state = HealthState::new();
        state.begin_shutdown();
        assert!(!state.is_ready());
    }

    #[test]
    fn test_unhealthy_stores_drop_readiness() {
        let state = HealthState::new();
        state.set_stores_healthy(false);
        assert!(!state.is_ready());
        state.set_stores_healthy(true);
        assert!(state.is_ready());
    }
}
