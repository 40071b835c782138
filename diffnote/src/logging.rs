//! Diagnostic logging.
//!
//! The TUI owns the terminal, so log output never goes to stdout or stderr.
//! When a log file is configured, `tracing` events are appended to it with the
//! filter taken from `DIFFNOTE_LOG` (default `info`). Without a log file no
//! subscriber is installed and events are discarded.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the `tracing` filter directives.
pub const LOG_ENV: &str = "DIFFNOTE_LOG";

/// Installs the global file logger.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber
/// is already installed.
pub fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::options().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file)),
        )
        .try_init()?;

    Ok(())
}
