//! Configuration module

use std::env;
use std::time::Duration;

/// Detector client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the ML scoring service
    pub detector_url: String,

    /// Per-request timeout for scoring calls
    pub detector_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            detector_url: env::var("DETECTOR_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),

            detector_timeout: env::var("DETECTOR_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(30)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detector_url: "http://localhost:8000".to_string(),
            detector_timeout: Duration::from_secs(30),
        }
    }
}
