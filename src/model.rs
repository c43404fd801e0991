//! Core data model for stargaze.
//!
//! These types carry a star history from the archive to disk:
//! raw events as collected, timeline points as reduced, and daily summaries.

mod event;
mod timeline;

pub use event::{MalformedEventError, RawEvent, StarAction};
pub use timeline::{DailyPoint, TimelinePoint};
