//! Database connection pool management and schema setup.

use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::Config;

/// Create a SQLite connection pool, creating the database file if missing.
pub async fn create_pool(config: &Config) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .context("invalid DATABASE_URL")?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect_with(options)
        .await
        .context("failed to connect to SQLite")?;

    Ok(pool)
}

/// Create the event table and its indexes if they do not exist.
///
/// AUTOINCREMENT keeps ids monotonically increasing and never reused
/// after deletion. `ts` is stored as microseconds since the Unix epoch
/// (UTC), so range comparisons are numeric, never lexical.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS event (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            ts INTEGER NOT NULL,
            label TEXT NOT NULL,
            description TEXT,
            x REAL,
            y REAL,
            source TEXT
        )
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create event table")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_event_ts ON event (ts)")
        .execute(pool)
        .await
        .context("failed to create ts index")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_event_label ON event (label)")
        .execute(pool)
        .await
        .context("failed to create label index")?;

    Ok(())
}

/// Check if the database connection is healthy.
pub async fn check_health(pool: &SqlitePool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}
