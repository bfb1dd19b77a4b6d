//! Clock abstraction for deterministic timestamps.

use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// Services take a `Clock` instead of calling `Utc::now()` directly so that
/// rollback and history timestamps are deterministic under test.
pub trait Clock: Send + Sync + 'static {
    /// Return the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that always returns a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
