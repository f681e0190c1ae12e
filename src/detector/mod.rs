//! Detector contract
//!
//! The external two-stage scoring model is a black box behind this trait. The
//! production implementation is [`http::HttpDetector`]; tests substitute an
//! in-memory fake.

mod http;

pub use http::HttpDetector;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{AnomalyStatus, LogEntry, Severity};

/// One scored result from the model, field-for-field the `data` payload of
/// the scoring service response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResult {
    /// Missing in some batch responses; the client back-fills it from the
    /// input entry at the same index.
    #[serde(default)]
    pub api_name: Option<String>,
    pub stage: Option<u8>,
    pub model: Option<String>,
    pub anomaly_score: Option<f64>,
    pub stage2_score: Option<f64>,
    pub final_anomaly_score: Option<f64>,
    pub status: AnomalyStatus,
    pub severity: Severity,
    pub confidence: f64,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Metadata about the deployed scoring pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub stage1_model: String,
    pub stage2_model: String,
    pub confidence_threshold_stage1: f64,
    pub confidence_threshold_stage2: f64,
    pub features: u32,
    pub description: String,
}

/// External anomaly scoring service.
#[async_trait]
pub trait Detector: Send + Sync {
    /// Score a single log entry. Never substitutes a zero score: any failure
    /// surfaces as [`crate::Error::DetectorUnavailable`].
    async fn score(&self, entry: &LogEntry) -> Result<ScoredResult>;

    /// Score a batch. The i-th result corresponds to the i-th input; a result
    /// count differing from the input count is an error.
    async fn score_batch(&self, entries: &[LogEntry]) -> Result<Vec<ScoredResult>>;

    /// Metadata about the deployed models, same error semantics as scoring.
    async fn model_info(&self) -> Result<ModelInfo>;

    /// Reachability probe, degraded to a boolean rather than raising.
    async fn health(&self) -> bool;
}
