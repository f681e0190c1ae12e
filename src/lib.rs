//! API Monitoring - Anomaly Record Management Core
//!
//! In-memory anomaly record management for monitored APIs: detection
//! orchestration against an external ML scoring service, a concurrent record
//! store, recency queries, per-API statistics, and the acknowledgment
//! workflow. The HTTP surface, persistence, and the scoring model itself live
//! outside this crate.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                     ANOMALY CORE                          │
//! ├───────────────────────────────────────────────────────────┤
//! │  ┌────────────┐      ┌─────────────────────────────────┐  │
//! │  │  Detector  │────▶ │  AnomalyService                 │  │
//! │  │  (reqwest) │      │  detect / recent / statistics   │  │
//! │  └─────┬──────┘      │  acknowledge / health           │  │
//! │        │             └───────────────┬─────────────────┘  │
//! │        ▼                             ▼                    │
//! │  ML scoring service          ┌──────────────┐             │
//! │  (external)                  │ AnomalyStore │             │
//! │                              │ (RwLock)     │             │
//! │                              └──────────────┘             │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use apimon_core::{AnomalyService, AnomalyStore, Config, HttpDetector, LogEntry};
//!
//! # async fn run() -> apimon_core::Result<()> {
//! let detector = Arc::new(HttpDetector::new(Config::from_env()));
//! let service = AnomalyService::new(detector, Arc::new(AnomalyStore::new()));
//!
//! let mut entry = LogEntry::for_api("orders");
//! entry.error_rate = Some(0.12);
//! let anomaly = service.detect_one(&entry).await?;
//! println!("{}: {}", anomaly.api_name, anomaly.status);
//! # Ok(())
//! # }
//! ```

mod clock;
mod config;
mod detector;
mod error;
mod models;
mod service;
mod store;

pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use detector::{Detector, HttpDetector, ModelInfo, ScoredResult};
pub use error::{Error, Result};
pub use models::{
    AnomalyRecord, AnomalyResponse, AnomalyStatus, ApiStatistics, HealthReport, LogEntry,
    Severity, Trend,
};
pub use service::AnomalyService;
pub use store::AnomalyStore;
