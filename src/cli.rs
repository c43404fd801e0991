//! CLI interface for stargaze.
//!
//! Each subcommand is non-interactive: arguments in, JSON out.
//!
//! - `stargaze collect <owner/name>`: download star events from the archive.
//! - `stargaze timeline <owner/name>`: download and reduce in one go.
//! - `stargaze reduce --events <file>`: reduce a previously collected file.
//!
//! JSON is written to `--out` (if given) or stdout. A one-line summary is
//! printed to stderr when writing to a file.

mod collect;
mod format;
mod reduce;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use jiff::Timestamp;
use jiff::civil::Date;
use jiff::tz::TimeZone;
use serde::Serialize;
use tracing::info;

use crate::archive::DateRange;
use crate::config::Config;
use crate::model::RawEvent;
use crate::{storage, timeline};

use format::describe_timeline;

/// Stargaze: star history from GitHub Archive.
#[derive(Debug, Parser)]
#[command(name = "stargaze", version, after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r"Workflow: star history for a repository
  1. stargaze collect promptfoo/promptfoo --from 2023-04-28 --out events.json
  2. stargaze reduce --events events.json --out timeline.json
  3. stargaze reduce --events events.json --daily --out daily.json

Or in one step:
  stargaze timeline promptfoo/promptfoo --from 2023-04-28 --out timeline.json

Logging goes to stderr; set STARGAZE_LOG=debug to see every hour fetched.";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download star events for a repository from GitHub Archive.
    ///
    /// Writes the unsorted raw events as a JSON array.
    Collect {
        #[command(flatten)]
        fetch: FetchArgs,

        /// Write the events JSON to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Download star events and reduce them to a running-count timeline.
    Timeline {
        #[command(flatten)]
        fetch: FetchArgs,

        /// Emit one point per UTC day instead of one per event.
        #[arg(long)]
        daily: bool,

        /// Write the timeline JSON to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Reduce a previously collected events file to a timeline.
    Reduce {
        /// Events JSON written by `stargaze collect`.
        #[arg(long)]
        events: PathBuf,

        /// Emit one point per UTC day instead of one per event.
        #[arg(long)]
        daily: bool,

        /// Write the timeline JSON to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// What to fetch from the archive.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Repository as `owner/name`.
    #[arg(value_parser = parse_repository)]
    repository: String,

    /// First day to fetch (UTC, `YYYY-MM-DD`).
    /// Defaults to `start-date` from the config file, else today.
    #[arg(long)]
    from: Option<Date>,

    /// Last day to fetch, inclusive (UTC, `YYYY-MM-DD`). Defaults to today.
    #[arg(long)]
    to: Option<Date>,

    /// Archive base URL. Overrides `STARGAZE_ARCHIVE_URL` and the config file.
    #[arg(long)]
    archive_url: Option<String>,
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config) -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Collect { fetch, out } => collect::cmd_collect(config, &fetch, out.as_deref()),
        Command::Timeline { fetch, daily, out } => {
            collect::cmd_timeline(config, &fetch, daily, out.as_deref())
        }
        Command::Reduce { events, daily, out } => {
            reduce::cmd_reduce(&events, daily, out.as_deref())
        }
    }
}

/// Validate an `owner/name` repository argument.
fn parse_repository(s: &str) -> Result<String, String> {
    let valid = s.split_once('/').is_some_and(|(owner, name)| {
        !owner.is_empty() && !name.is_empty() && !name.contains('/')
    }) && !s.chars().any(char::is_whitespace);

    if valid {
        Ok(s.to_string())
    } else {
        Err(format!("expected `owner/name`, got '{s}'"))
    }
}

/// Resolve `--from`/`--to` against the config file and today's UTC date.
fn resolve_range(
    config: &Config,
    from: Option<Date>,
    to: Option<Date>,
    today: Date,
) -> Result<DateRange, String> {
    let end = to.unwrap_or(today);
    let start = from.or(config.start_date).unwrap_or(today);
    DateRange::new(start, end).map_err(|e| e.to_string())
}

fn today_utc() -> Date {
    Timestamp::now().to_zoned(TimeZone::UTC).date()
}

/// Reduce events and write the requested shape: one point per event, or
/// one per day with `daily`.
fn emit_timeline(
    events: Vec<RawEvent>,
    daily: bool,
    out: Option<&Path>,
    context: Option<&str>,
) -> Result<(), String> {
    let points = timeline::reduce(events);
    info!(points = points.len(), daily, "timeline reduced");

    let summary = match context {
        Some(context) => format!("{context}; {}", describe_timeline(&points)),
        None => describe_timeline(&points),
    };

    if daily {
        let days = timeline::daily(&points).map_err(|e| e.to_string())?;
        emit(&days, out, &summary)
    } else {
        emit(&points, out, &summary)
    }
}

/// Write JSON to `out`, or stdout when no file was given.
fn emit<T: Serialize + ?Sized>(value: &T, out: Option<&Path>, summary: &str) -> Result<(), String> {
    match out {
        Some(path) => {
            storage::write_json(path, value)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            eprintln!("{summary} → {}", path.display());
        }
        None => {
            let json = storage::to_json(value)
                .map_err(|e| format!("failed to serialize output: {e}"))?;
            write_stdout(io::stdout().lock(), &json)?;
        }
    }
    Ok(())
}

/// Write to stdout without panicking when the reader goes away.
fn write_stdout(mut writer: impl Write, json: &str) -> Result<(), String> {
    writer
        .write_all(json.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| format!("failed to write to stdout: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use jiff::civil::date;
    use tempfile::TempDir;

    use crate::model::StarAction;

    #[test]
    fn parses_timeline_arguments() {
        let cli = Cli::try_parse_from([
            "stargaze",
            "timeline",
            "a/b",
            "--from",
            "2023-04-28",
            "--daily",
        ])
        .unwrap();

        match cli.command {
            Command::Timeline { fetch, daily, out } => {
                assert_eq!(fetch.repository, "a/b");
                assert_eq!(fetch.from, Some(date(2023, 4, 28)));
                assert_eq!(fetch.to, None);
                assert!(daily);
                assert!(out.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_reduce_arguments() {
        let cli = Cli::try_parse_from([
            "stargaze", "reduce", "--events", "events.json", "--out", "t.json",
        ])
        .unwrap();

        match cli.command {
            Command::Reduce { events, daily, out } => {
                assert_eq!(events, PathBuf::from("events.json"));
                assert!(!daily);
                assert_eq!(out, Some(PathBuf::from("t.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_from_date() {
        let err =
            Cli::try_parse_from(["stargaze", "collect", "a/b", "--from", "2023-13-40"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn rejects_bad_repository_argument() {
        let err = Cli::try_parse_from(["stargaze", "collect", "promptfoo"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn accepts_owner_slash_name() {
        assert_eq!(
            parse_repository("promptfoo/promptfoo").unwrap(),
            "promptfoo/promptfoo"
        );
    }

    #[test]
    fn rejects_bad_repositories() {
        for bad in ["promptfoo", "/promptfoo", "promptfoo/", "a/b/c", "a /b", ""] {
            assert!(parse_repository(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn range_defaults_to_today() {
        let today = date(2024, 1, 10);
        let range = resolve_range(&Config::default(), None, None, today).unwrap();

        assert_eq!(range.start(), today);
        assert_eq!(range.end(), today);
    }

    #[test]
    fn range_falls_back_to_configured_start() {
        let config = Config {
            start_date: Some(date(2023, 4, 28)),
            ..Config::default()
        };
        let range = resolve_range(&config, None, None, date(2024, 1, 10)).unwrap();
        assert_eq!(range.start(), date(2023, 4, 28));

        let range =
            resolve_range(&config, Some(date(2023, 12, 1)), None, date(2024, 1, 10)).unwrap();
        assert_eq!(range.start(), date(2023, 12, 1));
    }

    #[test]
    fn range_rejects_start_after_end() {
        let err = resolve_range(
            &Config::default(),
            Some(date(2024, 2, 1)),
            Some(date(2024, 1, 1)),
            date(2024, 3, 1),
        )
        .unwrap_err();
        assert!(err.contains("after end date"));
    }

    fn two_events() -> Vec<RawEvent> {
        vec![
            RawEvent {
                timestamp: "2023-04-28T02:00:00Z".into(),
                actor: "b".into(),
                action: StarAction::Started,
                repository: "a/b".into(),
            },
            RawEvent {
                timestamp: "2023-04-28T01:00:00Z".into(),
                actor: "a".into(),
                action: StarAction::Started,
                repository: "a/b".into(),
            },
        ]
    }

    fn read_json(path: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn writes_per_event_timeline() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("timeline.json");

        emit_timeline(two_events(), false, Some(out.as_path()), None).unwrap();

        let value = read_json(&out);
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["user"], "a");
        assert_eq!(value[1]["count"], 2);
    }

    #[test]
    fn writes_daily_timeline() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("daily.json");

        emit_timeline(two_events(), true, Some(out.as_path()), Some("Collected")).unwrap();

        let value = read_json(&out);
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["date"], "2023-04-28");
        assert_eq!(value[0]["count"], 2);
        assert_eq!(value[0]["started"], 2);
    }

    #[test]
    fn emit_reports_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let err = emit(
            &two_events(),
            Some(dir.path().join("missing/out.json").as_path()),
            "x",
        )
        .unwrap_err();
        assert!(err.starts_with("failed to write"));
    }

    /// Writer whose reader has hung up.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn stdout_write_error_is_returned() {
        let err = write_stdout(ClosedPipe, "[]\n").unwrap_err();
        assert!(err.starts_with("failed to write to stdout"));
    }

    #[test]
    fn stdout_write_passes_json_through() {
        let mut buf = Vec::new();
        write_stdout(&mut buf, "[]\n").unwrap();
        assert_eq!(buf, b"[]\n");
    }
}
