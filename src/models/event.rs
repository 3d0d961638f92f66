//! Event model: a single recorded observation with a timestamp, a short
//! label, optional text, optional 2D coordinate, and optional source tag.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use crate::query::{EventFilter, EventQueryBuilder, Page};

/// Event record.
///
/// Read-only once created; the only mutation is a hard delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Store-assigned id, monotonically increasing, never reused.
    pub id: i64,

    /// When the event happened (UTC).
    pub ts: DateTime<Utc>,

    /// Short tag like "crack" or "rust" or "note" (1 to 32 chars).
    pub label: String,

    /// Optional longer text (at most 500 chars).
    pub description: Option<String>,

    /// Optional X coordinate.
    pub x: Option<f64>,

    /// Optional Y coordinate.
    pub y: Option<f64>,

    /// Optional source like "manual" or "video" or "sensor".
    pub source: Option<String>,
}

/// Input for creating an event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvent {
    pub ts: DateTime<Utc>,
    pub label: String,
    pub description: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub source: Option<String>,
}

impl CreateEvent {
    /// Validate field constraints before touching the store.
    pub fn validate(&self) -> Result<(), String> {
        let label_len = self.label.chars().count();
        if label_len == 0 || label_len > 32 {
            return Err("label must be 1 to 32 characters".to_string());
        }

        if let Some(ref description) = self.description
            && description.chars().count() > 500
        {
            return Err("description must be at most 500 characters".to_string());
        }

        Ok(())
    }
}

// Timestamps are persisted as microseconds since the Unix epoch, so the
// row mapping converts back to DateTime<Utc>. A value outside chrono's
// range is a decode error, not a panic.
impl<'r> FromRow<'r, SqliteRow> for Event {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let ts_micros: i64 = row.try_get("ts")?;
        let ts = DateTime::from_timestamp_micros(ts_micros).ok_or_else(|| {
            sqlx::Error::ColumnDecode {
                index: "ts".to_string(),
                source: format!("timestamp out of range: {ts_micros}").into(),
            }
        })?;

        Ok(Self {
            id: row.try_get("id")?,
            ts,
            label: row.try_get("label")?,
            description: row.try_get("description")?,
            x: row.try_get("x")?,
            y: row.try_get("y")?,
            source: row.try_get("source")?,
        })
    }
}

impl Event {
    /// Create a new event. The store assigns the id; the full
    /// materialized record is returned.
    pub async fn create(pool: &SqlitePool, input: CreateEvent) -> Result<Self> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO event (ts, label, description, x, y, source)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, ts, label, description, x, y, source
            "#,
        )
        .bind(input.ts.timestamp_micros())
        .bind(&input.label)
        .bind(&input.description)
        .bind(input.x)
        .bind(input.y)
        .bind(&input.source)
        .fetch_one(pool)
        .await
        .context("failed to create event")?;

        Ok(event)
    }

    /// Find an event by id.
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, ts, label, description, x, y, source FROM event WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch event by id")?;

        Ok(event)
    }

    /// Hard-delete an event. Returns true if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM event WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete event")?;

        Ok(result.rows_affected() > 0)
    }

    /// Count events matching the filter. No ordering or pagination.
    pub async fn count(pool: &SqlitePool, filter: &EventFilter) -> Result<i64> {
        let sql = EventQueryBuilder::new(filter.clone()).build_count();

        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(pool)
            .await
            .context("failed to count events")?;

        Ok(count)
    }

    /// List one page of matching events, newest first.
    ///
    /// Together with [`Event::count`] this backs the listing endpoint;
    /// the two run as independent queries and may observe different
    /// snapshots under concurrent writes.
    pub async fn list(pool: &SqlitePool, filter: &EventFilter, page: &Page) -> Result<Vec<Self>> {
        let sql = EventQueryBuilder::new(filter.clone()).build_page(page);

        let events = sqlx::query_as::<_, Event>(&sql)
            .fetch_all(pool)
            .await
            .context("failed to list events")?;

        Ok(events)
    }

    /// Fetch all matching events in listing order, with no pagination
    /// ceiling. Backs the CSV export.
    pub async fn export(pool: &SqlitePool, filter: &EventFilter) -> Result<Vec<Self>> {
        let sql = EventQueryBuilder::new(filter.clone()).build_export();

        let events = sqlx::query_as::<_, Event>(&sql)
            .fetch_all(pool)
            .await
            .context("failed to export events")?;

        Ok(events)
    }
}
