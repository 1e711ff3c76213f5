//! Tracing setup
//!
//! The TUI owns the terminal, so its events go to a daily log file. CLI
//! commands log warnings and errors to stderr. `RUST_LOG` overrides the
//! configured level in both modes.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directory holding TUI log files
pub fn log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("cruisecast").join("logs"))
}

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// File logging for the TUI. Keep the guard alive until exit so buffered
/// lines are flushed.
pub fn init_tui(default_level: &str) -> Option<WorkerGuard> {
    let dir = log_dir()?;
    if std::fs::create_dir_all(&dir).is_err() {
        return None;
    }

    let appender = tracing_appender::rolling::daily(dir, "cruisecast.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter(default_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .ok()?;

    Some(guard)
}

/// Stderr logging for one-shot commands
pub fn init_cli(quiet: bool) {
    let level = if quiet { "error" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
