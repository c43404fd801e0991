mod archive;
mod cli;
mod config;
mod model;
mod storage;
mod timeline;

use std::process;

use tracing_subscriber::EnvFilter;

use config::Config;

fn main() {
    init_tracing();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(&config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Log to stderr, filtered by `STARGAZE_LOG` (default `info`).
/// Stdout is reserved for JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("STARGAZE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
