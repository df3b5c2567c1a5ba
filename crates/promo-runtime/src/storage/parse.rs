//! Lenient timestamp and hour parsing for raw log fields

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use promo_core::TimeSignal;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Minute-precision and space-separated forms with an offset; RFC 3339
/// covers the rest
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M%z",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const CLOCK_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Parse a log timestamp. Returns `None` for anything unrecognized.
///
/// Offsets (including a trailing `Z`) are dropped and the wall-clock time is
/// kept.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.naive_local());
        }
    }

    if let Some(utc) = raw.strip_suffix(|c: char| c == 'Z' || c == 'z') {
        return DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(utc, format).ok());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Extract an hour of day (0..24) from a time signal
pub fn parse_hour(signal: &TimeSignal) -> Option<u32> {
    match signal {
        TimeSignal::Hour(h) => u32::try_from(*h).ok().filter(|h| *h < 24),
        TimeSignal::Text(text) => {
            let text = text.trim();

            if let Some(dt) = parse_timestamp(text) {
                return Some(dt.hour());
            }

            for format in CLOCK_FORMATS {
                if let Ok(time) = NaiveTime::parse_from_str(text, format) {
                    return Some(time.hour());
                }
            }

            text.parse::<u32>().ok().filter(|h| *h < 24)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hm(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_plain_date_is_midnight() {
        assert_eq!(parse_timestamp("2024-01-01"), Some(ymd_hm(2024, 1, 1, 0, 0)));
        assert_eq!(parse_timestamp("2024/03/05"), Some(ymd_hm(2024, 3, 5, 0, 0)));
    }

    #[test]
    fn test_parse_datetime_variants() {
        assert_eq!(
            parse_timestamp("2024-01-01T08:00"),
            Some(ymd_hm(2024, 1, 1, 8, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-01 13:45:10"),
            Some(ymd_hm(2024, 1, 1, 13, 45).with_second(10).unwrap())
        );
        assert_eq!(
            parse_timestamp("2024-01-01T22:15:00+02:00"),
            Some(ymd_hm(2024, 1, 1, 22, 15))
        );
    }

    #[test]
    fn test_parse_minute_precision_with_offset() {
        assert_eq!(
            parse_timestamp("2024-01-01T08:00Z"),
            Some(ymd_hm(2024, 1, 1, 8, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-01T08:00+02:00"),
            Some(ymd_hm(2024, 1, 1, 8, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-01 21:30-0500"),
            Some(ymd_hm(2024, 1, 1, 21, 30))
        );
        assert_eq!(parse_hour(&"2024-01-01T08:00Z".into()), Some(8));
        assert_eq!(parse_hour(&"2024-01-01T19:15+02:00".into()), Some(19));
    }

    #[test]
    fn test_parse_malformed_timestamps() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp("2024-13-01"), None);
        assert_eq!(parse_timestamp("2024-02-30"), None);
        assert_eq!(parse_timestamp("Z"), None);
    }

    #[test]
    fn test_parse_hour_from_signals() {
        assert_eq!(parse_hour(&TimeSignal::Hour(8)), Some(8));
        assert_eq!(parse_hour(&TimeSignal::Hour(24)), None);
        assert_eq!(parse_hour(&TimeSignal::Hour(-1)), None);
        assert_eq!(parse_hour(&"2024-01-01T19:30".into()), Some(19));
        assert_eq!(parse_hour(&"07:15".into()), Some(7));
        assert_eq!(parse_hour(&"23:59:59".into()), Some(23));
        assert_eq!(parse_hour(&"13".into()), Some(13));
        assert_eq!(parse_hour(&"noon".into()), None);
    }
}
