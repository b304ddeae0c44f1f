use crate::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Keeps the non-blocking log writer alive; dropping it flushes pending lines.
pub type LoggingGuard = WorkerGuard;

/// Installs the process-wide subscriber. Call once at startup and hold the
/// guard until shutdown.
///
/// If a global subscriber is already installed it is kept, so repeated calls
/// are harmless.
pub fn init_logging(config: &LoggingConfig, component: &str) -> LoggingGuard {
    let log_dir = config.resolved_directory();
    let _ = std::fs::create_dir_all(&log_dir);

    // Roll daily, with the component name as the prefix
    // This will create files like shell.log.2026-10-16
    let file_appender = tracing_appender::rolling::daily(&log_dir, component);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    // File layer: no ANSI colors, output to file
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    let installed = if config.stderr {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);
        registry.with(stderr_layer).try_init()
    } else {
        registry.try_init()
    };

    if installed.is_err() {
        tracing::debug!("Global subscriber already installed, keeping it");
    }

    guard
}
