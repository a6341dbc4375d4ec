use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directives, e.g. `NOSAVE_LOG=nosave_core=debug`
const LOG_FILTER_ENV: &str = "NOSAVE_LOG";

/// Log file path used when the frontend doesn't pass one
const LOG_FILE_ENV: &str = "NOSAVE_LOG_FILE";

/// Install the global subscriber.
///
/// Logs only go to a file (the explicit path, else `$NOSAVE_LOG_FILE`).
/// Without either, nothing is installed and tracing macros are no-ops,
/// which keeps the terminal clean for the TUI.
pub fn init_tracing(log_path: Option<&Path>) -> Result<()> {
    let path = match log_path {
        Some(path) => path.to_path_buf(),
        None => match std::env::var_os(LOG_FILE_ENV) {
            Some(path) => path.into(),
            None => return Ok(()),
        },
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(())
}
