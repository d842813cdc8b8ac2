//! Injectable clock used for the store's sole internal ordering key.
//!
//! The store never calls `SystemTime::now()` directly so that tests can pin
//! received-at order without sleeping.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Produces the "received-at" instant stamped onto every ingested record.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The production clock: wall-clock time via `chrono::Utc::now()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A deterministic clock for tests: starts at a fixed instant and advances by
/// one microsecond on every call, guaranteeing distinct, monotonically
/// increasing timestamps without depending on wall-clock resolution.
#[derive(Debug)]
pub struct FixedClock {
    micros: AtomicI64,
}

impl FixedClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            micros: AtomicI64::new(start.timestamp_micros()),
        }
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(DateTime::from_timestamp(1_700_000_000, 0).expect("valid fixed epoch"))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        let micros = self.micros.fetch_add(1, Ordering::Relaxed);
        DateTime::from_timestamp_micros(micros).expect("fixed clock stays in range")
    }
}
