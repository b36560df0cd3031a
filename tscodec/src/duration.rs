use std::fmt;

use crate::codec::TimestampCodec;

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

// The *_in helpers truncate toward zero, so every component of a negative
// duration is zero or negative.

/// Full days in a duration
pub fn days_in(duration_millis: i64) -> i64 {
    duration_millis / MILLIS_PER_DAY
}

/// Hours left over after removing full days
pub fn hours_remainder_in(duration_millis: i64) -> i64 {
    (duration_millis % MILLIS_PER_DAY) / MILLIS_PER_HOUR
}

/// Minutes left over after removing full hours
pub fn minutes_remainder_in(duration_millis: i64) -> i64 {
    (duration_millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE
}

/// Seconds left over after removing full minutes
pub fn seconds_remainder_in(duration_millis: i64) -> i64 {
    (duration_millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND
}

/// Milliseconds left over after removing full seconds
pub fn millis_remainder_in(duration_millis: i64) -> i64 {
    duration_millis % MILLIS_PER_SECOND
}

/// A duration split into calendar-free components. Negative durations are
/// decomposed on their magnitude with `negative` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationParts {
    pub negative: bool,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub millis: u64,
}

impl DurationParts {
    pub fn from_millis(duration_millis: i64) -> Self {
        let magnitude = duration_millis.unsigned_abs();
        let per_day = MILLIS_PER_DAY as u64;
        let per_hour = MILLIS_PER_HOUR as u64;
        let per_minute = MILLIS_PER_MINUTE as u64;
        let per_second = MILLIS_PER_SECOND as u64;

        Self {
            negative: duration_millis < 0,
            days: magnitude / per_day,
            hours: (magnitude % per_day) / per_hour,
            minutes: (magnitude % per_hour) / per_minute,
            seconds: (magnitude % per_minute) / per_second,
            millis: magnitude % per_second,
        }
    }

    /// Elapsed time from `start` to `end`; negative when `end` is earlier
    pub fn between(start: &TimestampCodec, end: &TimestampCodec) -> Self {
        Self::from_millis(end.millis().saturating_sub(start.millis()))
    }
}

impl fmt::Display for DurationParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        if self.days > 0 {
            write!(f, "{}d ", self.days)?;
        }
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            self.hours, self.minutes, self.seconds, self.millis
        )
    }
}
