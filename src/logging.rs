//! Tracing setup for applications embedding refoveo

use std::fs::OpenOptions;
use std::path::Path;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{Layer, Registry};

/// Environment variable holding the filter directives, e.g. `refoveo=debug`
pub const LOG_ENV_VAR: &str = "REFOVEO_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to open log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("A global subscriber is already installed: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

fn env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy()
}

/// Install a global subscriber appending to `log_path`.
///
/// Writes go through a background thread; keep the returned guard alive for
/// as long as events should be flushed.
pub fn init_logging(log_path: &Path, format: LogFormat) -> Result<WorkerGuard, LoggingError> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);
    let layer: Box<dyn Layer<Registry> + Send + Sync> = match format {
        LogFormat::Text => layer.with_filter(env_filter()).boxed(),
        LogFormat::Json => layer.json().with_filter(env_filter()).boxed(),
    };

    tracing_subscriber::registry().with(layer).try_init()?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_logging_writes_to_file_and_refuses_second_install() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/refoveo.log");

        let guard = init_logging(&path, LogFormat::Json).unwrap();
        tracing::error!(target: "refoveo", "store unavailable");
        drop(guard);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("store unavailable"), "{}", content);

        assert!(matches!(
            init_logging(&path, LogFormat::Text),
            Err(LoggingError::AlreadyInitialized(_))
        ));
    }
}
