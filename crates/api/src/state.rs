//! Application state for the coordinator gateway.

use std::sync::Arc;
use std::time::Instant;

use cepnet_coordinator::Coordinator;

/// Shared application state. The coordinator is read-only after startup.
pub struct AppState {
    pub coordinator: Arc<Coordinator>,

    /// Server start time (for health checks)
    pub start_time: Instant,
}

impl AppState {
    pub fn new(coordinator: Coordinator) -> Self {
        Self {
            coordinator: Arc::new(coordinator),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
