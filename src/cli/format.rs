//! Output formatting for CLI display.

use crate::archive::Collection;
use crate::model::TimelinePoint;

/// One-line summary of a collection run.
pub(super) fn describe_collection(repository: &str, collection: &Collection) -> String {
    let hours = collection.fetched + collection.missing + collection.failed;
    let mut line = format!(
        "Collected {} star event(s) for {repository} from {hours} hour(s)",
        collection.events.len()
    );

    let mut skipped = Vec::new();
    if collection.missing > 0 {
        skipped.push(format!("{} missing", collection.missing));
    }
    if collection.failed > 0 {
        skipped.push(format!("{} failed", collection.failed));
    }
    if !skipped.is_empty() {
        line.push_str(&format!(" ({})", skipped.join(", ")));
    }

    line
}

/// One-line summary of a reduced timeline.
pub(super) fn describe_timeline(points: &[TimelinePoint]) -> String {
    match points.last() {
        Some(last) => format!(
            "timeline of {} point(s), {} star(s) at {}",
            points.len(),
            last.count,
            last.timestamp
        ),
        None => "empty timeline".to_string(),
    }
}
