//! Decoding one hourly dump: gzip, then one JSON object per line.

use std::io::{BufRead, BufReader};

use flate2::read::MultiGzDecoder;
use serde::Deserialize;

use crate::model::{MalformedEventError, RawEvent};

use super::ArchiveError;

/// JSON shape of one archive record.
///
/// Everything is optional: most records are other event types, and only the
/// ones that match get validated.
#[derive(Debug, Deserialize)]
pub struct ArchiveRecord {
    #[serde(rename = "type")]
    kind: Option<String>,
    actor: Option<ArchiveActor>,
    repo: Option<ArchiveRepo>,
    payload: Option<ArchivePayload>,
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArchiveActor {
    login: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArchiveRepo {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArchivePayload {
    action: Option<String>,
}

impl ArchiveRecord {
    /// Whether this is a `WatchEvent` on the given repository.
    pub fn is_star_for(&self, repository: &str) -> bool {
        self.kind.as_deref() == Some("WatchEvent")
            && self
                .repo
                .as_ref()
                .and_then(|r| r.name.as_deref())
                .is_some_and(|name| name == repository)
    }

    /// Validate into a [`RawEvent`].
    pub fn into_raw_event(self) -> Result<RawEvent, MalformedEventError> {
        RawEvent::new(
            self.created_at,
            self.actor.and_then(|a| a.login),
            self.payload.and_then(|p| p.action),
            self.repo.and_then(|r| r.name),
        )
    }
}

/// Decompress a gzipped dump and parse each non-empty line.
pub fn decode_hour(bytes: &[u8]) -> Result<Vec<ArchiveRecord>, ArchiveError> {
    let reader = BufReader::new(MultiGzDecoder::new(bytes));
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| ArchiveError::Json {
            line: index + 1,
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}
