use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use util::config;

/// Install the global subscriber: a daily log file in `LOG_DIR`, plus stderr when
/// `LOG_TO_STDERR=true`. stdout is left to the transcript.
///
/// The returned guard must be held until exit so buffered lines are flushed.
pub fn init_logging() -> WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let log_dir = config::log_dir();
    fs::create_dir_all(&log_dir).ok();

    let file_appender = rolling::daily(&log_dir, config::log_file());
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true);

    let env_filter = EnvFilter::try_from_env("LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new(config::log_level()));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    // A second initialisation in the same process keeps the first subscriber.
    if config::log_to_stderr() {
        registry.with(stderr_layer).try_init().ok();
    } else {
        registry.try_init().ok();
    }

    tracing::info!(project = %config::project_name(), "Logging initialised");
    guard
}
