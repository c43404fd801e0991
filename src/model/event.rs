//! Raw star events: one validated `WatchEvent` for the target repository.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A record that failed validation at the collection boundary.
///
/// Fatal for the run: skipping it would silently corrupt the running count.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedEventError {
    #[error("malformed event: missing field `{0}`")]
    MissingField(&'static str),

    #[error("malformed event: field `{0}` is empty")]
    EmptyField(&'static str),

    #[error("malformed event: invalid timestamp `{value}`: {reason}")]
    InvalidTimestamp { value: String, reason: String },
}

/// What a star event did.
///
/// The archive only documents `started`; `deleted` shows up in older dumps.
/// Anything else is kept verbatim so it survives a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StarAction {
    /// A star was added.
    Started,

    /// A star was removed.
    Deleted,

    /// Unrecognized action, passed through untouched.
    Other(String),
}

impl StarAction {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Started => "started",
            Self::Deleted => "deleted",
            Self::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for StarAction {
    fn from(s: String) -> Self {
        match s.as_str() {
            "started" => Self::Started,
            "deleted" => Self::Deleted,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for StarAction {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<StarAction> for String {
    fn from(action: StarAction) -> Self {
        match action {
            StarAction::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// A single star action against one repository.
///
/// `timestamp` is kept as the archive's own string. GitHub Archive emits
/// zero-padded UTC instants (`2023-04-28T01:00:00Z`), so ordering the strings
/// orders the events in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventRecord")]
pub struct RawEvent {
    pub timestamp: String,
    #[serde(rename = "user")]
    pub actor: String,
    pub action: StarAction,
    pub repository: String,
}

impl RawEvent {
    /// Build an event, checking that every field is present and the
    /// timestamp is a real instant in `YYYY-MM-DDTHH:MM:SSZ` form.
    pub fn new(
        timestamp: Option<String>,
        actor: Option<String>,
        action: Option<String>,
        repository: Option<String>,
    ) -> Result<Self, MalformedEventError> {
        let timestamp = required("timestamp", timestamp)?;
        let actor = required("user", actor)?;
        let action = required("action", action)?;
        let repository = required("repository", repository)?;

        if let Err(reason) = check_timestamp(&timestamp) {
            return Err(MalformedEventError::InvalidTimestamp {
                value: timestamp,
                reason,
            });
        }

        Ok(Self {
            timestamp,
            actor,
            action: StarAction::from(action),
            repository,
        })
    }
}

/// Only the archive's own form sorts correctly as a string: whole seconds,
/// UTC, zero-padded.
fn check_timestamp(value: &str) -> Result<(), String> {
    let instant: Timestamp = value.parse().map_err(|e: jiff::Error| e.to_string())?;
    let canonical = instant.strftime(TIMESTAMP_FORMAT).to_string();
    if canonical == value {
        Ok(())
    } else {
        Err(format!("expected UTC form `{canonical}`"))
    }
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

fn required(field: &'static str, value: Option<String>) -> Result<String, MalformedEventError> {
    match value {
        None => Err(MalformedEventError::MissingField(field)),
        Some(s) if s.trim().is_empty() => Err(MalformedEventError::EmptyField(field)),
        Some(s) => Ok(s),
    }
}

/// Loose shape of a stored event, before validation.
#[derive(Debug, Deserialize)]
pub struct EventRecord {
    timestamp: Option<String>,
    user: Option<String>,
    action: Option<String>,
    repository: Option<String>,
}

impl TryFrom<EventRecord> for RawEvent {
    type Error = MalformedEventError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.timestamp,
            record.user,
            record.action,
            record.repository,
        )
    }
}
