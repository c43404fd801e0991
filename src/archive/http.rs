//! HTTP access to the archive server.

use std::time::Duration;

use reqwest::StatusCode;
use tracing::debug;

use super::{ArchiveError, ArchiveHour, ArchiveSource};

/// Connection settings for [`HttpArchive`].
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Base URL the hourly file names are appended to.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

/// Fetches hourly dumps over HTTPS with a blocking client.
pub struct HttpArchive {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpArchive {
    pub fn new(settings: &HttpSettings) -> Result<Self, ArchiveError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.timeout)
            .user_agent(concat!("stargaze/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: normalize_base_url(&settings.base_url),
            client,
        })
    }

    fn url_for(&self, hour: &ArchiveHour) -> String {
        format!("{}{}", self.base_url, hour.file_name())
    }
}

impl ArchiveSource for HttpArchive {
    fn fetch(&self, hour: &ArchiveHour) -> Result<Option<Vec<u8>>, ArchiveError> {
        let url = self.url_for(hour);
        debug!(%url, "fetching");

        let response = self.client.get(&url).send()?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.bytes()?.to_vec())),
            status => Err(ArchiveError::Status(status.as_u16())),
        }
    }
}

/// Ensure exactly one trailing slash.
fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
}
