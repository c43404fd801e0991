//! File persistence for collected events and reduced timelines.
//!
//! Everything is written as a pretty-printed JSON array, one file per run:
//!
//! ```text
//! events.json     # [RawEvent]      from `collect`
//! timeline.json   # [TimelinePoint] from `timeline` / `reduce`
//! daily.json      # [DailyPoint]    with `--daily`
//! ```

use std::{fs, io, path::Path};

use serde::Serialize;

use crate::model::RawEvent;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("events span more than one repository: {first} and {other}")]
    MixedRepositories { first: String, other: String },
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// Render a value the way it is written to disk.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

/// Write a value as pretty JSON, replacing any existing file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    fs::write(path, to_json(value)?)?;
    Ok(())
}

/// Load a previously collected event file.
///
/// Every record is validated; a missing field fails the whole load, and so
/// does a file holding events for more than one repository.
pub fn load_events(path: &Path) -> Result<Vec<RawEvent>> {
    let json = fs::read_to_string(path)?;
    let events: Vec<RawEvent> = serde_json::from_str(&json)?;

    if let Some(first) = events.first()
        && let Some(other) = events.iter().find(|e| e.repository != first.repository)
    {
        return Err(StorageError::MixedRepositories {
            first: first.repository.clone(),
            other: other.repository.clone(),
        });
    }

    Ok(events)
}
