//! File logging.
//!
//! The terminal belongs to the UI, so log output goes to a file only:
//! `<cache dir>/p2p-assist/assistant.log` unless `[logging].directory` says
//! otherwise. `RUST_LOG` overrides the configured level.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Log file name inside the log directory.
pub const LOG_FILE_NAME: &str = "assistant.log";

/// Resolve the directory log files are written to.
pub fn log_dir(config: &LoggingConfig) -> Option<PathBuf> {
    config
        .directory
        .clone()
        .or_else(|| dirs::cache_dir().map(|p| p.join("p2p-assist")))
}

/// Install the global subscriber.
///
/// Returns the appender guard; dropping it flushes and stops the writer, so
/// keep it alive for the life of the program. Returns `None` when logging is
/// disabled or no directory could be determined.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    if !config.enabled {
        return None;
    }
    let dir = log_dir(config)?;
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Could not create log directory {}: {}", dir.display(), e);
        return None;
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().with_writer(writer).with_ansi(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init();

    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_prefers_configured_directory() {
        let config = LoggingConfig {
            directory: Some(PathBuf::from("/tmp/p2p-logs")),
            ..Default::default()
        };
        assert_eq!(log_dir(&config), Some(PathBuf::from("/tmp/p2p-logs")));
    }

    #[test]
    fn test_disabled_logging_installs_nothing() {
        let config = LoggingConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(init(&config).is_none());
    }
}
