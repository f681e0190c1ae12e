//! Anomaly service
//!
//! Orchestrates the detector, the store, and every read path exposed to the
//! (external) HTTP layer: single/batch detection, recency queries, per-API
//! statistics, acknowledgment, and the aggregate health view.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Instant;

use chrono::{Duration, Timelike};

use crate::clock::{Clock, SystemClock};
use crate::detector::{Detector, ModelInfo, ScoredResult};
use crate::error::{Error, Result};
use crate::models::{
    AnomalyRecord, AnomalyResponse, AnomalyStatus, ApiStatistics, HealthReport, LogEntry, Trend,
};
use crate::models::parse_event_timestamp;
use crate::store::AnomalyStore;

/// Core anomaly record management service.
///
/// The store is the only shared mutable state; every operation runs on its
/// own task and only the detector calls block on I/O.
pub struct AnomalyService {
    detector: Arc<dyn Detector>,
    store: Arc<AnomalyStore>,
    clock: Arc<dyn Clock>,
    started: Instant,
}

impl AnomalyService {
    pub fn new(detector: Arc<dyn Detector>, store: Arc<AnomalyStore>) -> Self {
        Self::with_clock(detector, store, Arc::new(SystemClock))
    }

    /// Construct with an explicit clock; statistics windows are computed
    /// against it.
    pub fn with_clock(
        detector: Arc<dyn Detector>,
        store: Arc<AnomalyStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            detector,
            store,
            clock,
            started: Instant::now(),
        }
    }

    // ------------------------------------------------------------------
    // Detection
    // ------------------------------------------------------------------

    /// Score one log entry and persist the resulting record.
    pub async fn detect_one(&self, entry: &LogEntry) -> Result<AnomalyResponse> {
        validate_entry(entry)?;

        tracing::info!("Anomaly detection requested for API: {}", entry.api_name);
        let scored = self.detector.score(entry).await.map_err(|e| {
            tracing::error!("Detection failed for API {}: {}", entry.api_name, e);
            e
        })?;

        let record = self.build_record(scored, entry);
        let response = record.to_response();
        self.store.insert(record);

        tracing::info!(
            "Anomaly detection completed for API: {} with status: {}",
            entry.api_name,
            response.status
        );
        Ok(response)
    }

    /// Score a batch of log entries, persisting one record per entry in input
    /// order. A failed batch call inserts nothing.
    pub async fn detect_batch(&self, entries: &[LogEntry]) -> Result<Vec<AnomalyResponse>> {
        for entry in entries {
            validate_entry(entry)?;
        }

        tracing::info!("Batch anomaly detection requested for {} logs", entries.len());
        let scored = self.detector.score_batch(entries).await.map_err(|e| {
            tracing::error!("Batch detection failed: {}", e);
            e
        })?;

        // The client enforces this; a detector bypassing it must not cause a
        // partial insert.
        if scored.len() != entries.len() {
            return Err(Error::DetectorUnavailable(format!(
                "batch result count mismatch: sent {}, got {}",
                entries.len(),
                scored.len()
            )));
        }

        let responses: Vec<AnomalyResponse> = scored
            .into_iter()
            .zip(entries)
            .map(|(result, entry)| {
                let record = self.build_record(result, entry);
                let response = record.to_response();
                self.store.insert(record);
                response
            })
            .collect();

        tracing::info!("Batch anomaly detection completed for {} logs", responses.len());
        Ok(responses)
    }

    fn build_record(&self, scored: ScoredResult, entry: &LogEntry) -> AnomalyRecord {
        let timestamp = scored
            .timestamp
            .as_deref()
            .and_then(parse_event_timestamp)
            .unwrap_or_else(|| self.clock.now());

        AnomalyRecord {
            id: self.store.next_id(),
            api_name: scored.api_name.unwrap_or_else(|| entry.api_name.clone()),
            stage: scored.stage,
            model: scored.model,
            anomaly_score: scored.anomaly_score,
            stage2_score: scored.stage2_score,
            final_anomaly_score: scored.final_anomaly_score,
            status: scored.status,
            severity: scored.severity,
            confidence: scored.confidence,
            timestamp,
            acknowledged: false,
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Unacknowledged records for one API (or all APIs when `api_name` is
    /// `None`), newest event first, at most `limit` entries. Equal timestamps
    /// keep their insertion order.
    pub fn recent(&self, api_name: Option<&str>, limit: usize) -> Vec<AnomalyResponse> {
        let mut records: Vec<AnomalyRecord> = self
            .store
            .snapshot()
            .into_iter()
            .filter(|r| api_name.map_or(true, |name| r.api_name == name))
            .filter(|r| !r.acknowledged)
            .collect();

        // Stable sort: ties stay in insertion order
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records.truncate(limit);
        records.iter().map(AnomalyRecord::to_response).collect()
    }

    /// Aggregate statistics over every record for `api_name`, acknowledged
    /// records included. Windows are evaluated against the service clock.
    pub fn statistics(&self, api_name: &str) -> ApiStatistics {
        let now = self.clock.now();
        let records: Vec<AnomalyRecord> = self
            .store
            .snapshot()
            .into_iter()
            .filter(|r| r.api_name == api_name)
            .collect();

        let total_logs = records.len() as u64;
        let mut normal_count = 0u64;
        let mut suspicious_count = 0u64;
        let mut anomaly_count = 0u64;
        for record in &records {
            match record.status {
                AnomalyStatus::Normal => normal_count += 1,
                AnomalyStatus::Suspicious => suspicious_count += 1,
                AnomalyStatus::AnomalyDetected => anomaly_count += 1,
            }
        }

        // Missing scores count as 0.0 and stay in the denominator.
        let avg_anomaly_score = if records.is_empty() {
            0.0
        } else {
            records
                .iter()
                .map(|r| r.final_anomaly_score.unwrap_or(0.0))
                .sum::<f64>()
                / records.len() as f64
        };

        let anomalies: Vec<&AnomalyRecord> = records
            .iter()
            .filter(|r| r.status == AnomalyStatus::AnomalyDetected)
            .collect();

        // Peak hour: most anomalies per hour-of-day; ties go to the hour
        // first encountered in insertion order.
        let mut hour_counts: HashMap<u32, u64> = HashMap::new();
        let mut hour_order: Vec<u32> = Vec::new();
        for record in &anomalies {
            let hour = record.timestamp.hour();
            let count = hour_counts.entry(hour).or_insert_with(|| {
                hour_order.push(hour);
                0
            });
            *count += 1;
        }
        let mut peak_hour: Option<u32> = None;
        let mut peak_count = 0u64;
        for hour in hour_order {
            let count = hour_counts[&hour];
            if count > peak_count {
                peak_count = count;
                peak_hour = Some(hour);
            }
        }

        let day_ago = now - Duration::hours(24);
        let two_days_ago = now - Duration::hours(48);
        let last_24h_anomalies = anomalies
            .iter()
            .filter(|r| r.timestamp > day_ago)
            .count() as u64;
        let previous_24h_anomalies = anomalies
            .iter()
            .filter(|r| r.timestamp > two_days_ago && r.timestamp <= day_ago)
            .count() as u64;

        let alerts_triggered = anomalies
            .iter()
            .filter(|r| r.severity.triggers_alert())
            .count() as u64;

        let error_rate_trend = if last_24h_anomalies > previous_24h_anomalies {
            Trend::Increasing
        } else if last_24h_anomalies < previous_24h_anomalies {
            Trend::Decreasing
        } else {
            Trend::Stable
        };

        ApiStatistics {
            api_name: api_name.to_string(),
            total_logs,
            normal_count,
            suspicious_count,
            anomaly_count,
            avg_anomaly_score,
            peak_hour,
            last_24h_anomalies,
            alerts_triggered,
            error_rate_trend,
        }
    }

    // ------------------------------------------------------------------
    // Acknowledgment
    // ------------------------------------------------------------------

    /// Mark an anomaly as handled. Idempotent; false for an unknown id.
    pub fn acknowledge(&self, id: u64) -> bool {
        let acknowledged = self.store.acknowledge(id);
        if acknowledged {
            tracing::info!("Anomaly {} acknowledged", id);
        } else {
            tracing::warn!("Acknowledge requested for unknown anomaly id {}", id);
        }
        acknowledged
    }

    // ------------------------------------------------------------------
    // Aggregate views
    // ------------------------------------------------------------------

    /// Count of unacknowledged detected anomalies across all APIs.
    pub fn active_alerts_count(&self) -> u64 {
        self.store
            .snapshot()
            .iter()
            .filter(|r| r.is_active_alert())
            .count() as u64
    }

    /// Distinct API names seen across all records.
    pub fn monitored_apis(&self) -> BTreeSet<String> {
        self.store
            .snapshot()
            .into_iter()
            .map(|r| r.api_name)
            .collect()
    }

    /// Metadata about the deployed scoring pipeline.
    pub async fn model_info(&self) -> Result<ModelInfo> {
        self.detector.model_info().await
    }

    /// Composite health view: detector reachability plus store-derived
    /// counts. Reports "degraded" when the detector is unreachable; the
    /// forced-false "unhealthy" shape ([`HealthReport::unhealthy`]) is the
    /// outer layer's catch-all for internal failures.
    pub async fn health(&self) -> HealthReport {
        let probe_started = Instant::now();
        let detector_status = self.detector.health().await;
        let processing_latency_ms = probe_started.elapsed().as_millis() as u64;

        let status = if detector_status { "healthy" } else { "degraded" };
        tracing::info!(
            "Health check: detector={}, status={}",
            detector_status,
            status
        );

        HealthReport {
            status: status.to_string(),
            detector_status,
            // The store lives in-process; reachable by construction.
            database_status: true,
            total_apis_monitored: self.monitored_apis().len() as u64,
            active_alerts: self.active_alerts_count(),
            processing_latency_ms,
            uptime_secs: self.started.elapsed().as_secs(),
        }
    }
}

fn validate_entry(entry: &LogEntry) -> Result<()> {
    if entry.api_name.trim().is_empty() {
        return Err(Error::InvalidInput("api_name must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_name_is_rejected() {
        let entry = LogEntry::for_api("  ");
        let err = validate_entry(&entry).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(validate_entry(&LogEntry::for_api("orders")).is_ok());
    }
}
