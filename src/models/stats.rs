//! Per-API statistics model

use serde::{Deserialize, Serialize};

/// Direction of the anomaly rate, comparing the last 24h window against the
/// 24h before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregate view over every stored record for one API, acknowledged records
/// included. Computed fresh per call against the service clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiStatistics {
    pub api_name: String,
    pub total_logs: u64,
    pub normal_count: u64,
    pub suspicious_count: u64,
    pub anomaly_count: u64,
    /// Mean of `final_anomaly_score`. A missing score counts as 0.0 and
    /// stays in the denominator.
    pub avg_anomaly_score: f64,
    /// Hour of day (0-23) with the most detected anomalies, if any.
    pub peak_hour: Option<u32>,
    pub last_24h_anomalies: u64,
    /// Detected anomalies with HIGH or MEDIUM severity.
    pub alerts_triggered: u64,
    pub error_rate_trend: Trend,
}
