//! CSV rendering of the export result set.
//!
//! The rows come from [`Event::export`], i.e. the same filter and sort
//! order as the listing endpoint. This module only serializes; it never
//! re-filters.

use chrono::SecondsFormat;

use crate::models::Event;

/// Fixed column order for the export document.
const HEADER: &str = "id,ts,label,description,x,y,source";

/// Render events as a CSV document.
///
/// The header row is always emitted, even for zero events. Absent
/// optional fields render as empty fields. Fields containing separators,
/// quotes, or line breaks are quoted per RFC 4180; records end in CRLF.
pub fn events_to_csv(events: &[Event]) -> String {
    let mut out = String::with_capacity(HEADER.len() + 2 + events.len() * 64);
    out.push_str(HEADER);
    out.push_str("\r\n");

    for event in events {
        let fields = [
            event.id.to_string(),
            event.ts.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            escape_field(&event.label),
            event
                .description
                .as_deref()
                .map(escape_field)
                .unwrap_or_default(),
            event.x.map(|v| v.to_string()).unwrap_or_default(),
            event.y.map(|v| v.to_string()).unwrap_or_default(),
            event.source.as_deref().map(escape_field).unwrap_or_default(),
        ];

        out.push_str(&fields.join(","));
        out.push_str("\r\n");
    }

    out
}

/// Quote a field if it contains a separator, quote, or line break,
/// doubling any embedded quotes.
fn escape_field(field: &str) -> String {
    if field.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(id: i64) -> Event {
        Event {
            id,
            ts: Utc.with_ymd_and_hms(2026, 1, 21, 12, 0, 0).unwrap(),
            label: "crack".to_string(),
            description: None,
            x: None,
            y: None,
            source: None,
        }
    }

    #[test]
    fn empty_export_is_header_only() {
        assert_eq!(events_to_csv(&[]), "id,ts,label,description,x,y,source\r\n");
    }

    #[test]
    fn absent_optionals_render_as_empty_fields() {
        let csv = events_to_csv(&[event(1)]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("id,ts,label,description,x,y,source"));
        assert_eq!(lines.next(), Some("1,2026-01-21T12:00:00Z,crack,,,,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn populated_fields_render_in_column_order() {
        let mut e = event(7);
        e.description = Some("hairline crack".to_string());
        e.x = Some(1.5);
        e.y = Some(2.5);
        e.source = Some("manual".to_string());

        let csv = events_to_csv(&[e]);
        assert!(
            csv.ends_with("7,2026-01-21T12:00:00Z,crack,hairline crack,1.5,2.5,manual\r\n"),
            "{csv}"
        );
    }

    #[test]
    fn separators_and_quotes_are_escaped() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn rows_follow_input_order() {
        let csv = events_to_csv(&[event(2), event(1)]);
        let ids: Vec<&str> = csv
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(ids, ["2", "1"]);
    }
}
