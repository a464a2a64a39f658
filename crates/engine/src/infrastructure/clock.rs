//! System clock adapter.

use chrono::{DateTime, Utc};

use crate::ports::ClockPort;

/// Production clock: reads the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
