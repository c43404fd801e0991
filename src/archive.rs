//! GitHub Archive collection: fetch hourly dumps and pull out star events.
//!
//! Each hour of the archive is one gzipped file of newline-delimited JSON.
//! The collector walks a date range hour by hour, keeps the `WatchEvent`
//! records for one repository, and validates them into [`RawEvent`]s.
//!
//! A failed hour (network, HTTP status, bad gzip, bad JSON) is logged and
//! skipped. A matching record with missing fields aborts the whole run.

mod decode;
mod hours;
mod http;

pub use decode::decode_hour;
pub use hours::{ArchiveHour, DateRange};
pub use http::{HttpArchive, HttpSettings};

use tracing::{debug, info, warn};

use crate::model::{MalformedEventError, RawEvent};

/// Default location of the hourly dumps.
pub const DEFAULT_ARCHIVE_URL: &str = "https://data.gharchive.org/";

/// Errors from fetching or decoding a single archive hour.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("decompression failed: {0}")]
    Decode(#[from] std::io::Error),

    #[error("invalid JSON on line {line}: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },
}

/// Errors that stop a collection run.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("{hour}: {source}")]
    Malformed {
        hour: String,
        source: MalformedEventError,
    },
}

/// Where hourly dumps come from.
pub trait ArchiveSource {
    /// Fetch the gzipped dump for one hour.
    ///
    /// Returns `Ok(None)` when the hour has not been published.
    fn fetch(&self, hour: &ArchiveHour) -> Result<Option<Vec<u8>>, ArchiveError>;
}

/// What a collection run produced.
#[derive(Debug, Default)]
pub struct Collection {
    /// Star events in archive order (not sorted).
    pub events: Vec<RawEvent>,

    /// Hours downloaded and decoded.
    pub fetched: usize,

    /// Hours not yet published.
    pub missing: usize,

    /// Hours skipped after an error.
    pub failed: usize,
}

/// Collect every star event for `repository` within `range`.
pub fn collect(
    source: &impl ArchiveSource,
    repository: &str,
    range: &DateRange,
) -> Result<Collection, CollectError> {
    let mut collection = Collection::default();

    for hour in range.hours() {
        let records = match source.fetch(&hour) {
            Ok(Some(bytes)) => match decode_hour(&bytes) {
                Ok(records) => records,
                Err(e) => {
                    warn!(%hour, error = %e, "skipping undecodable hour");
                    collection.failed += 1;
                    continue;
                }
            },
            Ok(None) => {
                debug!(%hour, "hour not published");
                collection.missing += 1;
                continue;
            }
            Err(e) => {
                warn!(%hour, error = %e, "skipping hour after fetch error");
                collection.failed += 1;
                continue;
            }
        };

        collection.fetched += 1;
        let before = collection.events.len();

        for record in records {
            if !record.is_star_for(repository) {
                continue;
            }
            let event = record
                .into_raw_event()
                .map_err(|source| CollectError::Malformed {
                    hour: hour.to_string(),
                    source,
                })?;
            collection.events.push(event);
        }

        debug!(
            %hour,
            stars = collection.events.len() - before,
            "hour collected"
        );
    }

    info!(
        repository,
        events = collection.events.len(),
        fetched = collection.fetched,
        missing = collection.missing,
        failed = collection.failed,
        "collection finished"
    );

    Ok(collection)
}
