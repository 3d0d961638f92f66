//! Database models.

pub mod event;

pub use event::{CreateEvent, Event};
