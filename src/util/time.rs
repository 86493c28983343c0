//! Timestamp helpers shared by models and services.
//!
//! Every stored timestamp is an RFC 3339 UTC string with millisecond
//! precision, so lexicographic order on the store side equals chronological
//! order.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a client supplied date into the stored timestamp format.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` (interpreted as UTC) and a bare
/// `YYYY-MM-DD` (midnight UTC).
pub fn parse_client_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(format_timestamp(at.with_timezone(&Utc)));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(format_timestamp(naive.and_utc()));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| format_timestamp(naive.and_utc()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_date() {
        assert_eq!(parse_client_date("2025-03-14").as_deref(), Some("2025-03-14T00:00:00.000Z"));
    }

    #[test]
    fn test_parse_rfc3339_with_offset_normalizes_to_utc() {
        assert_eq!(
            parse_client_date("2025-03-14T10:30:00+05:00").as_deref(),
            Some("2025-03-14T05:30:00.000Z")
        );
    }

    #[test]
    fn test_parse_datetime_local() {
        assert_eq!(parse_client_date("2025-03-14T10:30").as_deref(), Some("2025-03-14T10:30:00.000Z"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_client_date("next tuesday").is_none());
        assert!(parse_client_date("2025-13-40").is_none());
        assert!(parse_client_date("   ").is_none());
    }

    #[test]
    fn test_timestamps_sort_chronologically() {
        let earlier = parse_client_date("2025-03-14T09:59:59.5Z").unwrap();
        let later = parse_client_date("2025-03-14T10:00:00Z").unwrap();
        assert!(earlier < later);
    }
}
