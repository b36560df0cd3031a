//! Formatting and field extraction for calendar instants.
//!
//! Patterns use chrono's strftime syntax (`%Y-%m-%d %H:%M:%S`). They are
//! checked before use, so a bad pattern is an error instead of a panic
//! halfway through rendering.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Timelike, Utc};

use crate::error::InvalidArgument;

fn parse_pattern(pattern: &str) -> Result<Vec<Item<'_>>, InvalidArgument> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(InvalidArgument::Pattern(pattern.to_string()));
    }
    Ok(items)
}

/// Render `instant` with `pattern` in its own time zone
pub fn format<Tz>(instant: &DateTime<Tz>, pattern: &str) -> Result<String, InvalidArgument>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let items = parse_pattern(pattern)?;
    // Some items parse but cannot be rendered (`%#z`); chrono reports those as fmt::Error
    let mut out = String::new();
    write!(out, "{}", instant.format_with_items(items.into_iter()))
        .map_err(|_| InvalidArgument::Pattern(pattern.to_string()))?;
    Ok(out)
}

/// Render epoch milliseconds as UTC
pub fn format_millis(millis: i64, pattern: &str) -> Result<String, InvalidArgument> {
    let instant = DateTime::<Utc>::from_timestamp_millis(millis).ok_or(InvalidArgument::OutOfRange(millis))?;
    format(&instant, pattern)
}

/// Render `instant` at a fixed UTC offset
pub fn format_with_offset<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    pattern: &str,
    offset: FixedOffset,
) -> Result<String, InvalidArgument> {
    format(&instant.with_timezone(&offset), pattern)
}

pub fn year<Tz: TimeZone>(instant: &DateTime<Tz>) -> i32 {
    instant.year()
}

/// 1-based
pub fn month<Tz: TimeZone>(instant: &DateTime<Tz>) -> u32 {
    instant.month()
}

/// Day of month, 1-based
pub fn day<Tz: TimeZone>(instant: &DateTime<Tz>) -> u32 {
    instant.day()
}

/// 0-23
pub fn hour<Tz: TimeZone>(instant: &DateTime<Tz>) -> u32 {
    instant.hour()
}

pub fn minute<Tz: TimeZone>(instant: &DateTime<Tz>) -> u32 {
    instant.minute()
}

pub fn second<Tz: TimeZone>(instant: &DateTime<Tz>) -> u32 {
    instant.second()
}

/// Milliseconds within the second. A leap second reads as 1000-1999.
pub fn millisecond<Tz: TimeZone>(instant: &DateTime<Tz>) -> u32 {
    instant.timestamp_subsec_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MILLIS: i64 = 1484753291123;

    fn sample() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(MILLIS).unwrap()
    }

    #[test]
    fn test_format_utc() {
        assert_eq!(format(&sample(), "%Y-%m-%d %H:%M:%S").unwrap(), "2017-01-18 15:28:11");
        assert_eq!(format(&sample(), "%d.%m.%Y").unwrap(), "18.01.2017");
    }

    #[test]
    fn test_format_millis() {
        assert_eq!(format_millis(MILLIS, "%H:%M:%S%.3f").unwrap(), "15:28:11.123");
        assert_eq!(format_millis(0, "%Y").unwrap(), "1970");
    }

    #[test]
    fn test_format_with_offset() {
        let moscow = FixedOffset::east_opt(3 * 3600).unwrap();
        assert_eq!(
            format_with_offset(&sample(), "%Y-%m-%d %H:%M %z", moscow).unwrap(),
            "2017-01-18 18:28 +0300"
        );

        let west = FixedOffset::west_opt(16 * 3600).unwrap();
        assert_eq!(format_with_offset(&sample(), "%d %H", west).unwrap(), "17 23");
    }

    #[test]
    fn test_invalid_pattern() {
        assert_eq!(
            format(&sample(), "%Y-%Q").unwrap_err(),
            InvalidArgument::Pattern("%Y-%Q".to_string())
        );
        assert!(format_millis(MILLIS, "%").is_err());
    }

    #[test]
    fn test_unrenderable_pattern() {
        assert_eq!(
            format(&sample(), "%Y %#z").unwrap_err(),
            InvalidArgument::Pattern("%Y %#z".to_string())
        );
        let moscow = FixedOffset::east_opt(3 * 3600).unwrap();
        assert!(matches!(
            format_with_offset(&sample(), "%#z", moscow),
            Err(InvalidArgument::Pattern(_))
        ));
    }

    #[test]
    fn test_format_millis_out_of_range() {
        assert_eq!(
            format_millis(i64::MAX, "%Y").unwrap_err(),
            InvalidArgument::OutOfRange(i64::MAX)
        );
    }

    #[test]
    fn test_fields() {
        let instant = sample();
        assert_eq!(year(&instant), 2017);
        assert_eq!(month(&instant), 1);
        assert_eq!(day(&instant), 18);
        assert_eq!(hour(&instant), 15);
        assert_eq!(minute(&instant), 28);
        assert_eq!(second(&instant), 11);
        assert_eq!(millisecond(&instant), 123);
    }

    #[test]
    fn test_fields_follow_time_zone() {
        let offset = FixedOffset::east_opt(9 * 3600).unwrap();
        let local = sample().with_timezone(&offset);
        assert_eq!(day(&local), 19);
        assert_eq!(hour(&local), 0);
    }
}
