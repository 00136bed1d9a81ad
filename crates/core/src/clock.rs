//! Source of "now" for timestamping records.

use chrono::{DateTime, Utc};

/// Supplies the current instant.
///
/// Any `Fn() -> DateTime<Utc>` is a clock, which keeps tests deterministic
/// without a dedicated fake type.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc>,
{
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}
