//! Data models

mod anomaly;
mod health;
mod log_entry;
mod stats;

pub use anomaly::{AnomalyRecord, AnomalyResponse, AnomalyStatus, Severity};
pub(crate) use anomaly::parse_event_timestamp;
pub use health::HealthReport;
pub use log_entry::LogEntry;
pub use stats::{ApiStatistics, Trend};
