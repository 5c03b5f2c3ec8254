//! Logging initialization using the `tracing` ecosystem.
//!
//! Two sinks:
//! - Console output (colored, human-readable)
//! - An append-only, timestamped text file (never rotated)
//!
//! `RUST_LOG` overrides the configured level.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogConfig;
use crate::error::ConfigError;

/// Install the global tracing subscriber.
///
/// Call once at program start and keep the returned guard alive until exit;
/// dropping it flushes the file writer. An unusable log directory or a second
/// call fails with [`ConfigError::Logging`].
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>, ConfigError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let console_layer = fmt::layer().with_target(true).with_ansi(true);

    if let Some(dir) = config.dir.as_deref() {
        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(&config.file_name)
            .build(dir)
            .map_err(|e| ConfigError::Logging(format!("log directory {dir}: {e}")))?;
        let (writer, guard) = tracing_appender::non_blocking(file_appender);
        let file_layer = fmt::layer().with_writer(writer).with_ansi(false).with_target(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .map_err(|e| ConfigError::Logging(e.to_string()))?;
        Ok(Some(guard))
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .try_init()
            .map_err(|e| ConfigError::Logging(e.to_string()))?;
        Ok(None)
    }
}
