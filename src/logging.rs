//! Tracing setup.
//!
//! Logging is opt-in: the filter comes from `TASKTREE_LOG`, then `RUST_LOG`,
//! and is `off` otherwise. The CLI logs to stderr; the dashboard logs to a file
//! so output never lands on the alternate screen.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "TASKTREE_LOG";

/// Where log lines go.
pub enum Sink<'a> {
    Stderr,
    File(&'a Path),
}

/// Build the filter, ignoring unparsable or oversized values.
pub fn filter_from(raw: Option<String>) -> EnvFilter {
    raw.and_then(|raw| {
        let raw = raw.trim();
        if raw.is_empty() || raw.len() > 4096 {
            return None;
        }
        EnvFilter::try_new(raw).ok()
    })
    .unwrap_or_else(|| EnvFilter::new("off"))
}

/// Install the global subscriber. Safe to call once per process.
pub fn init(sink: Sink<'_>) {
    let raw = std::env::var(LOG_ENV)
        .ok()
        .or_else(|| std::env::var("RUST_LOG").ok());
    let filter = filter_from(raw);

    match sink {
        Sink::Stderr => {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(filter)
                .try_init();
        }
        Sink::File(path) => {
            // Without a log file the dashboard simply runs unlogged.
            if let Ok(file) = OpenOptions::new().create(true).append(true).open(path) {
                let _ = tracing_subscriber::registry()
                    .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                    .with(filter)
                    .try_init();
            }
        }
    }
}
