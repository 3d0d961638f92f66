//! Shared route helpers.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a timestamp in any of the accepted request forms: RFC 3339, a
/// naive datetime (treated as UTC), or a bare date (midnight UTC).
///
/// The store persists a single normalized representation (UTC epoch
/// microseconds), so accepting several input shapes here cannot disturb
/// query ordering.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}
