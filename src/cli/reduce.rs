//! Reduce command: timeline from a saved events file.

use std::path::Path;

use tracing::info;

use crate::storage;

use super::emit_timeline;

pub(super) fn cmd_reduce(events: &Path, daily: bool, out: Option<&Path>) -> Result<(), String> {
    let loaded = storage::load_events(events)
        .map_err(|e| format!("failed to load {}: {e}", events.display()))?;
    info!(events = loaded.len(), path = %events.display(), "loaded events");

    emit_timeline(loaded, daily, out, None)
}
