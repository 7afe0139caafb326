//! Lenient parsing of dates as the server sends them.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a calendar date from a wire string.
///
/// Accepts plain dates (`2024-03-01`), RFC 3339 timestamps, naive timestamps and
/// RFC 2822 / HTTP dates (`Fri, 01 Mar 2024 00:00:00 GMT`). Returns `None` for
/// anything else.
pub fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    NAIVE_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NAIVE_DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc2822(raw).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_accepted_formats() {
        assert_eq!(parse_wire_date("2024-03-01"), Some(ymd(2024, 3, 1)));
        assert_eq!(parse_wire_date(" 2024/03/01 "), Some(ymd(2024, 3, 1)));
        assert_eq!(parse_wire_date("2024-03-01T10:00:00Z"), Some(ymd(2024, 3, 1)));
        assert_eq!(parse_wire_date("2024-03-01T10:00:00"), Some(ymd(2024, 3, 1)));
        assert_eq!(
            parse_wire_date("Fri, 01 Mar 2024 00:00:00 GMT"),
            Some(ymd(2024, 3, 1))
        );
    }

    #[test]
    fn test_rejected_values() {
        assert_eq!(parse_wire_date(""), None);
        assert_eq!(parse_wire_date("not a date"), None);
        assert_eq!(parse_wire_date("2024-13-45"), None);
    }
}
