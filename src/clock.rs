//! Clock abstraction
//!
//! Statistics and trend windows compare record timestamps against "now", so
//! the service takes its notion of time through this trait instead of calling
//! `Utc::now()` inline. Tests freeze it.

use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
