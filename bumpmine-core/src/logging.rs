//! Logging infrastructure for bumpmine
//!
//! Logs are written to `~/.local/state/bumpmine/bumpmine.log` following XDG standards.

use crate::config::{Config, LoggingConfig, LOG_FILE_NAME};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Initialize the logging system
///
/// Sets up tracing with:
/// - File output to XDG state directory
/// - One file appended to by every run (no rotation)
/// - Configurable log level via config or RUST_LOG env var
pub fn init(config: &LoggingConfig) -> crate::error::Result<LoggingGuard> {
    let log_dir = Config::state_dir();
    let log_path = Config::log_path();

    std::fs::create_dir_all(&log_dir)?;

    // A run is short and infrequent, so every run appends to bumpmine.log
    let file_appender = RollingFileAppender::new(Rotation::NEVER, &log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // RUST_LOG wins over the configured level
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    tracing::info!(
        log_file = %log_path.display(),
        level = %config.level,
        pid = std::process::id(),
        "Logging initialized"
    );

    Ok(LoggingGuard { _guard: guard })
}

/// Initialize logging for tests (logs to stdout)
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}

/// Guard that keeps the logging system alive
///
/// When dropped, flushes any pending log writes. Hold it until the run's
/// last event has been emitted.
pub struct LoggingGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}
