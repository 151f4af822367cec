//! Clock Adapters
//!
//! Ledger time source. `ManualClock` lets tests pin and advance time.

use parking_lot::RwLock;
use shared_types::Timestamp;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of ledger-assigned timestamps.
pub trait Clock: Send + Sync {
    /// Current time in seconds since the Unix epoch.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Timestamp(secs)
    }
}

/// Settable time for tests.
#[derive(Debug)]
pub struct ManualClock {
    current: RwLock<u64>,
}

impl ManualClock {
    /// Start at `secs`.
    pub fn new(secs: u64) -> Self {
        Self {
            current: RwLock::new(secs),
        }
    }

    /// Set current time.
    pub fn set_time(&self, secs: u64) {
        *self.current.write() = secs;
    }

    /// Advance time.
    pub fn advance_time(&self, secs: u64) {
        *self.current.write() += secs;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(1_700_000_000)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(*self.current.read())
    }
}
