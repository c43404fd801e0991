//! Collect and timeline commands: fetch from the archive.

use std::path::Path;

use tracing::info;

use crate::archive::{self, Collection, HttpArchive};
use crate::config::Config;

use super::format::describe_collection;
use super::{FetchArgs, emit, emit_timeline, resolve_range, today_utc};

pub(super) fn cmd_collect(
    config: &Config,
    fetch: &FetchArgs,
    out: Option<&Path>,
) -> Result<(), String> {
    let collection = fetch_events(config, fetch)?;

    emit(
        &collection.events,
        out,
        &describe_collection(&fetch.repository, &collection),
    )
}

pub(super) fn cmd_timeline(
    config: &Config,
    fetch: &FetchArgs,
    daily: bool,
    out: Option<&Path>,
) -> Result<(), String> {
    let collection = fetch_events(config, fetch)?;
    let summary = describe_collection(&fetch.repository, &collection);

    emit_timeline(collection.events, daily, out, Some(summary.as_str()))
}

fn fetch_events(config: &Config, fetch: &FetchArgs) -> Result<Collection, String> {
    let range = resolve_range(config, fetch.from, fetch.to, today_utc())?;
    let settings = config.http_settings(fetch.archive_url.as_deref());

    info!(
        repository = %fetch.repository,
        from = %range.start(),
        to = %range.end(),
        archive = %settings.base_url,
        "collecting star events"
    );

    let source =
        HttpArchive::new(&settings).map_err(|e| format!("failed to set up HTTP client: {e}"))?;

    archive::collect(&source, &fetch.repository, &range)
        .map_err(|e| format!("collection aborted: {e}"))
}
