//! Anomaly record model

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Classification assigned by the scoring model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnomalyStatus {
    #[serde(rename = "NORMAL")]
    Normal,
    #[serde(rename = "SUSPICIOUS")]
    Suspicious,
    #[serde(rename = "ANOMALY_DETECTED")]
    AnomalyDetected,
}

impl AnomalyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyStatus::Normal => "NORMAL",
            AnomalyStatus::Suspicious => "SUSPICIOUS",
            AnomalyStatus::AnomalyDetected => "ANOMALY_DETECTED",
        }
    }
}

impl std::fmt::Display for AnomalyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse severity bucket derived from the score by the scoring model,
/// consumed as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Severities that count as triggered alerts in statistics.
    pub fn triggers_alert(&self) -> bool {
        matches!(self, Severity::High | Severity::Medium)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// A scored detection event tied to one API and one point in time.
///
/// Created once by the detection orchestrator; after that the only permitted
/// mutation is the `acknowledged` flag flipping false -> true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyRecord {
    /// Unique, monotonically assigned, never reused.
    pub id: u64,
    pub api_name: String,
    /// Which phase of the two-stage pipeline fired (1 or 2).
    pub stage: Option<u8>,
    /// Model name used by the scoring service.
    pub model: Option<String>,
    pub anomaly_score: Option<f64>,
    pub stage2_score: Option<f64>,
    pub final_anomaly_score: Option<f64>,
    pub status: AnomalyStatus,
    pub severity: Severity,
    pub confidence: f64,
    /// Event time (not insertion time).
    pub timestamp: DateTime<Utc>,
    pub acknowledged: bool,
}

impl AnomalyRecord {
    /// True for an unacknowledged record the model classified as an anomaly.
    pub fn is_active_alert(&self) -> bool {
        !self.acknowledged && self.status == AnomalyStatus::AnomalyDetected
    }

    /// Wire-level projection of this record.
    pub fn to_response(&self) -> AnomalyResponse {
        AnomalyResponse {
            id: self.id,
            api_name: self.api_name.clone(),
            stage: self.stage,
            model: self.model.clone(),
            anomaly_score: self.anomaly_score,
            stage2_score: self.stage2_score,
            final_anomaly_score: self.final_anomaly_score,
            status: self.status,
            severity: self.severity,
            confidence: self.confidence,
            timestamp: self.timestamp.to_rfc3339(),
            acknowledged: self.acknowledged,
        }
    }
}

/// External response shape for a record. One entity, two projections: the
/// stored [`AnomalyRecord`] and this, via [`AnomalyRecord::to_response`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyResponse {
    pub id: u64,
    pub api_name: String,
    pub stage: Option<u8>,
    pub model: Option<String>,
    pub anomaly_score: Option<f64>,
    pub stage2_score: Option<f64>,
    pub final_anomaly_score: Option<f64>,
    pub status: AnomalyStatus,
    pub severity: Severity,
    pub confidence: f64,
    pub timestamp: String,
    pub acknowledged: bool,
}

// ============================================================================
// TIMESTAMP PARSING
// ============================================================================

/// Parse an event timestamp as reported by the scoring service.
///
/// Accepts RFC 3339 or a bare ISO 8601 local datetime (the upstream model
/// emits `2024-01-01T00:00:00.123456` with an optional trailing `Z`); bare
/// values are taken as UTC. Returns `None` for anything else so the caller
/// can default to its clock.
pub fn parse_event_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let bare = raw.strip_suffix('Z').unwrap_or(raw);
    NaiveDateTime::parse_from_str(bare, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
