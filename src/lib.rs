//! Osserva
//!
//! REST service for recording and querying timestamped, optionally
//! geolocated field events, backed by SQLite, with filterable listing,
//! pagination, and CSV export.
//!
//! This library exposes the service internals for integration testing.
//! The entry point for running the server is the `osserva` binary.

pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod query;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
