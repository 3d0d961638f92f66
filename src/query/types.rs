//! Event query engine types.
//!
//! Provides type definitions for the filtered event queries:
//! - EventFilter: optional conjunctive predicates (time range, label,
//!   bounding box)
//! - Page: validated limit/offset pagination

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Default page size when the caller supplies no limit.
pub const DEFAULT_LIMIT: i64 = 50;

/// Maximum accepted page size.
pub const MAX_LIMIT: i64 = 200;

/// Filter specification for event queries.
///
/// Every field is independently optional; an absent bound is vacuously
/// true. An event matches iff every supplied bound is satisfied. A
/// contradictory range (min above max) is not an error and simply
/// matches nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    /// Inclusive lower time bound.
    pub start: Option<DateTime<Utc>>,

    /// Inclusive upper time bound.
    pub end: Option<DateTime<Utc>>,

    /// Exact (case-sensitive) label match.
    pub label: Option<String>,

    /// Inclusive bounding box on the x axis. An event with a NULL x
    /// never matches when either bound is supplied.
    pub min_x: Option<f64>,
    pub max_x: Option<f64>,

    /// Inclusive bounding box on the y axis.
    pub min_y: Option<f64>,
    pub max_y: Option<f64>,
}

/// Validated pagination parameters for the listing query.
///
/// Applies only to the page operation; count and export are unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

/// Rejected pagination input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("limit must not be negative")]
    NegativeLimit,

    #[error("limit must not exceed {MAX_LIMIT}")]
    LimitTooLarge,

    #[error("offset must not be negative")]
    NegativeOffset,
}

impl Page {
    /// Validate caller-supplied pagination, applying defaults for absent
    /// values. Negative values are rejected rather than clamped; a zero
    /// limit is valid and yields an empty page.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Result<Self, PageError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        let offset = offset.unwrap_or(0);

        if limit < 0 {
            return Err(PageError::NegativeLimit);
        }
        if limit > MAX_LIMIT {
            return Err(PageError::LimitTooLarge);
        }
        if offset < 0 {
            return Err(PageError::NegativeOffset);
        }

        Ok(Self { limit, offset })
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults() {
        let page = Page::new(None, None).unwrap();
        assert_eq!(page.limit, DEFAULT_LIMIT);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn page_zero_limit_is_valid() {
        let page = Page::new(Some(0), None).unwrap();
        assert_eq!(page.limit, 0);
    }

    #[test]
    fn page_rejects_negative_limit() {
        assert_eq!(Page::new(Some(-1), None), Err(PageError::NegativeLimit));
    }

    #[test]
    fn page_rejects_negative_offset() {
        assert_eq!(Page::new(None, Some(-5)), Err(PageError::NegativeOffset));
    }

    #[test]
    fn page_rejects_oversized_limit() {
        assert_eq!(
            Page::new(Some(MAX_LIMIT + 1), None),
            Err(PageError::LimitTooLarge)
        );
        assert!(Page::new(Some(MAX_LIMIT), None).is_ok());
    }

    #[test]
    fn filter_default_is_unconstrained() {
        let filter = EventFilter::default();
        assert!(filter.start.is_none());
        assert!(filter.end.is_none());
        assert!(filter.label.is_none());
        assert!(filter.min_x.is_none());
        assert!(filter.max_x.is_none());
        assert!(filter.min_y.is_none());
        assert!(filter.max_y.is_none());
    }
}
