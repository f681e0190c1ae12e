//! Aggregate health model

use serde::{Deserialize, Serialize};

/// Composite health view over the detector and the record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// "healthy" | "degraded" | "unhealthy"
    pub status: String,
    pub detector_status: bool,
    pub database_status: bool,
    pub total_apis_monitored: u64,
    pub active_alerts: u64,
    /// Measured latency of the detector health probe.
    pub processing_latency_ms: u64,
    pub uptime_secs: u64,
}

impl HealthReport {
    /// Catch-all shape for an internal failure: flags forced false, zeroed
    /// counts, never an error.
    pub fn unhealthy() -> Self {
        Self {
            status: "unhealthy".to_string(),
            detector_status: false,
            database_status: false,
            total_apis_monitored: 0,
            active_alerts: 0,
            processing_latency_ms: 0,
            uptime_secs: 0,
        }
    }
}
