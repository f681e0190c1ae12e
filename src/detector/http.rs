//! HTTP detector client
//!
//! Talks to the ML scoring service over its fixed JSON contract:
//! `POST /api/detect-anomaly`, `POST /api/detect-batch`,
//! `GET /api/model-info`, `GET /health`. Every success payload arrives
//! wrapped in a `{ success, data }` envelope.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::LogEntry;

use super::{Detector, ModelInfo, ScoredResult};

/// Reqwest-backed [`Detector`] for the external scoring service.
#[derive(Debug, Clone)]
pub struct HttpDetector {
    http: reqwest::Client,
    config: Config,
}

/// Success/data envelope used by every scoring endpoint.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload or normalize the failure shape.
    fn into_data(self) -> Result<T> {
        if !self.success {
            let reason = self
                .error
                .unwrap_or_else(|| "scoring service returned unsuccessful response".to_string());
            return Err(Error::DetectorUnavailable(reason));
        }
        self.data.ok_or_else(|| {
            Error::DetectorUnavailable("scoring service response missing data".to_string())
        })
    }
}

/// Normalized request body for the scoring service.
#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    api_name: &'a str,
    response_time: Option<f64>,
    status_code: Option<u16>,
    request_count: Option<u64>,
    error_rate: Option<f64>,
    cpu_usage: Option<f64>,
    memory_usage: Option<f64>,
    network_io: Option<f64>,
    disk_io: Option<f64>,
    hour_of_day: Option<u8>,
    day_of_week: Option<u8>,
    timestamp: String,
}

impl<'a> DetectRequest<'a> {
    fn from_entry(entry: &'a LogEntry) -> Self {
        Self {
            api_name: &entry.api_name,
            response_time: entry.response_time,
            status_code: entry.status_code,
            request_count: entry.request_count,
            error_rate: entry.error_rate,
            cpu_usage: entry.cpu_usage,
            memory_usage: entry.memory_usage,
            network_io: entry.network_io,
            disk_io: entry.disk_io,
            hour_of_day: entry.hour_of_day,
            day_of_week: entry.day_of_week,
            timestamp: entry
                .timestamp
                .clone()
                .unwrap_or_else(|| Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string()),
        }
    }
}

impl HttpDetector {
    pub fn new(config: Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// POST `body` to `path` and decode the enveloped payload.
    async fn post_enveloped<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.config.detector_url, path);

        let response = self
            .http
            .post(&url)
            .json(body)
            .timeout(self.config.detector_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Scoring service error: {} - {}", status, body);
            return Err(Error::DetectorUnavailable(format!(
                "scoring service returned {}",
                status
            )));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| Error::DetectorUnavailable(format!("malformed response body: {}", e)))?;
        envelope.into_data()
    }
}

#[async_trait]
impl Detector for HttpDetector {
    async fn score(&self, entry: &LogEntry) -> Result<ScoredResult> {
        let body = DetectRequest::from_entry(entry);
        let mut scored: ScoredResult = self.post_enveloped("/api/detect-anomaly", &body).await?;

        // Some model versions omit api_name in the response
        if scored.api_name.as_deref().map_or(true, str::is_empty) {
            scored.api_name = Some(entry.api_name.clone());
        }
        Ok(scored)
    }

    async fn score_batch(&self, entries: &[LogEntry]) -> Result<Vec<ScoredResult>> {
        let logs: Vec<DetectRequest<'_>> = entries.iter().map(DetectRequest::from_entry).collect();
        let body = json!({ "logs": logs });

        let mut results: Vec<ScoredResult> =
            self.post_enveloped("/api/detect-batch", &body).await?;

        if results.len() != entries.len() {
            return Err(Error::DetectorUnavailable(format!(
                "batch result count mismatch: sent {}, got {}",
                entries.len(),
                results.len()
            )));
        }

        for (scored, entry) in results.iter_mut().zip(entries) {
            if scored.api_name.as_deref().map_or(true, str::is_empty) {
                scored.api_name = Some(entry.api_name.clone());
            }
        }
        Ok(results)
    }

    async fn model_info(&self) -> Result<ModelInfo> {
        let url = format!("{}/api/model-info", self.config.detector_url);

        let response = self
            .http
            .get(&url)
            .timeout(self.config.detector_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::DetectorUnavailable(format!(
                "scoring service returned {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::DetectorUnavailable(format!("malformed response body: {}", e)))
    }

    async fn health(&self) -> bool {
        #[derive(Deserialize)]
        struct HealthBody {
            status: String,
        }

        let url = format!("{}/health", self.config.detector_url);

        let response = match self
            .http
            .get(&url)
            .timeout(self.config.detector_timeout)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Scoring service health probe failed: {}", e);
                return false;
            }
        };

        match response.json::<HealthBody>().await {
            Ok(body) => body.status == "healthy",
            Err(_) => false,
        }
    }
}
