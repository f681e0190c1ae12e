//! Log entry model

use serde::{Deserialize, Serialize};

/// One request-level telemetry sample for a monitored API.
///
/// Fields are forwarded to the scoring service verbatim; this subsystem only
/// checks that `api_name` is present and defaults a missing timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub api_name: String,
    pub response_time: Option<f64>,
    pub status_code: Option<u16>,
    pub request_count: Option<u64>,
    pub error_rate: Option<f64>,
    pub cpu_usage: Option<f64>,
    pub memory_usage: Option<f64>,
    pub network_io: Option<f64>,
    pub disk_io: Option<f64>,
    pub hour_of_day: Option<u8>,
    pub day_of_week: Option<u8>,
    /// Event time as reported upstream (ISO 8601 string, may be absent)
    pub timestamp: Option<String>,
}

impl LogEntry {
    /// Minimal entry for a named API, all telemetry fields unset.
    pub fn for_api(api_name: impl Into<String>) -> Self {
        Self {
            api_name: api_name.into(),
            response_time: None,
            status_code: None,
            request_count: None,
            error_rate: None,
            cpu_usage: None,
            memory_usage: None,
            network_io: None,
            disk_io: None,
            hour_of_day: None,
            day_of_week: None,
            timestamp: None,
        }
    }
}
