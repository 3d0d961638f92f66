//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::Result;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// SQLite connection pool.
    db: SqlitePool,
}

impl AppState {
    /// Initialize state from configuration: connect the pool and ensure
    /// the schema exists.
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = db::create_pool(config).await?;
        db::init_schema(&pool).await?;

        Ok(Self::from_pool(pool))
    }

    /// Build state around an existing pool. Used by integration tests,
    /// which bring their own in-memory database.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { db: pool }),
        }
    }

    /// Access the database pool.
    pub fn db(&self) -> &SqlitePool {
        &self.inner.db
    }

    /// Check database health.
    pub async fn db_healthy(&self) -> bool {
        db::check_health(&self.inner.db).await
    }
}
