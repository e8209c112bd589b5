// Timestamps are stored as RFC 3339 UTC strings with millisecond precision,
// so lexicographic order in SQL matches chronological order.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// Accepts RFC 3339 (any offset) or a bare `YYYY-MM-DD` taken as UTC midnight.
pub fn parse_date_input(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// Combine a `YYYY-MM-DD` date and an optional `HH:MM` time.
pub fn parse_date_and_time(date: &str, time: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = time.trim();
    let time = if time.is_empty() {
        NaiveTime::MIN
    } else {
        NaiveTime::parse_from_str(time, "%H:%M").ok()?
    };
    Some(Utc.from_utc_datetime(&NaiveDateTime::new(date, time)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
        assert_eq!(format_timestamp(at), "2024-03-05T14:30:00.000Z");
    }

    #[test]
    fn test_parse_date_input() {
        let parsed = parse_date_input("2024-03-05").unwrap();
        assert_eq!(format_timestamp(parsed), "2024-03-05T00:00:00.000Z");

        let parsed = parse_date_input("2024-03-05T10:00:00-03:00").unwrap();
        assert_eq!(format_timestamp(parsed), "2024-03-05T13:00:00.000Z");

        assert!(parse_date_input("").is_none());
        assert!(parse_date_input("ayer").is_none());
        assert!(parse_date_input("2024-13-40").is_none());
    }

    #[test]
    fn test_parse_date_and_time() {
        let parsed = parse_date_and_time("2024-11-20", "18:45").unwrap();
        assert_eq!(format_timestamp(parsed), "2024-11-20T18:45:00.000Z");

        let midnight = parse_date_and_time("2024-11-20", "  ").unwrap();
        assert_eq!(format_timestamp(midnight), "2024-11-20T00:00:00.000Z");

        assert!(parse_date_and_time("", "18:45").is_none());
        assert!(parse_date_and_time("2024-11-20", "25:00").is_none());
    }

    #[test]
    fn test_timestamps_sort_lexicographically() {
        let earlier = format_timestamp(Utc.with_ymd_and_hms(2024, 1, 9, 23, 59, 59).unwrap());
        let later = format_timestamp(Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap());
        assert!(earlier < later);
    }
}
