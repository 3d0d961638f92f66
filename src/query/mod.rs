//! Event query engine module.
//!
//! This module provides:
//! - EventFilter: the typed filter specification shared by listing,
//!   counting, and export
//! - Page: validated pagination parameters
//! - EventQueryBuilder: SeaQuery-based SQL generation

mod builder;
pub mod types;

pub use builder::EventQueryBuilder;
pub use types::{DEFAULT_LIMIT, EventFilter, MAX_LIMIT, Page, PageError};
