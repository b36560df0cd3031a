use chrono::Utc;

use crate::codec::TimestampCodec;
use crate::date_utils;
use crate::error::InvalidArgument;

/// Current wall-clock time in epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current wall-clock time rendered with `pattern` (UTC)
pub fn now_formatted(pattern: &str) -> Result<String, InvalidArgument> {
    date_utils::format_millis(now_millis(), pattern)
}

/// Current wall-clock time, truncated to whole milliseconds
pub fn now_codec() -> Result<TimestampCodec, InvalidArgument> {
    TimestampCodec::from_millis(now_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_after_2017() {
        assert!(now_millis() > 1484753291000);
    }

    #[test]
    fn test_now_codec_is_monotonic_enough() {
        let before = now_millis();
        let codec = now_codec().unwrap();
        let after = now_millis();
        assert!(codec.millis() >= before && codec.millis() <= after);
    }

    #[test]
    fn test_now_formatted() {
        let year = now_formatted("%Y").unwrap();
        assert_eq!(year.len(), 4);
        assert!(year.parse::<i32>().unwrap() >= 2017);
        assert!(now_formatted("%Q").is_err());
    }
}
