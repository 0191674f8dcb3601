//! Clock source: the only place that reads wall-clock time.
//!
//! Everything downstream receives [`CalendarFields`] or an explicit instant,
//! so the unlock policy, renderer and scheduler are deterministic under test.

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;

/// Abstraction over "current time" to make behavior deterministic in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant (tests and `--at` previews).
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Civil calendar fields of an instant as observed in one timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarFields {
    pub year: i32,
    /// 1-12
    pub month: u32,
    /// 1-31
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CalendarFields {
    /// Fields at local midnight of the given date.
    pub fn date(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }
}

/// Project an absolute instant into `tz`'s civil calendar, DST included.
pub fn fields_in(instant: DateTime<Utc>, tz: Tz) -> CalendarFields {
    let local = instant.with_timezone(&tz);
    CalendarFields {
        year: local.year(),
        month: local.month(),
        day: local.day(),
        hour: local.hour(),
        minute: local.minute(),
        second: local.second(),
    }
}

/// Current calendar fields in `tz` according to `clock`.
pub fn now_in(clock: &dyn Clock, tz: Tz) -> CalendarFields {
    fields_in(clock.now(), tz)
}
