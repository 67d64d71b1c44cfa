//! Tracing subscriber setup.

use crate::config::LoggingSettings;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "SANSKRITI_LOG";

/// Builds the filter: `SANSKRITI_LOG` first, then the configured level.
pub fn build_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::try_new(&settings.level).unwrap_or_else(|e| {
            eprintln!(
                "Invalid log level '{}' ({}), falling back to 'info'",
                settings.level, e
            );
            EnvFilter::new("info")
        })
    })
}

/// Installs the global subscriber.
///
/// Logs go to stderr, and to `log_dir/sanskriti.log.YYYY-MM-DD` when
/// `settings.file` is set. Keep the returned guard alive for the lifetime of
/// the process so buffered file output is flushed.
pub fn init_tracing(settings: &LoggingSettings, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let appender = log_dir.filter(|_| settings.file).and_then(file_appender);
    let (file_layer, guard) = match appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    let result = tracing_subscriber::registry()
        .with(build_filter(settings))
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    if let Err(e) = result {
        eprintln!("Tracing subscriber already installed: {}", e);
    }

    guard
}

/// Opens the daily log file under `dir`, or `None` (with a warning on
/// stderr) when the directory or file cannot be created.
fn file_appender(dir: &Path) -> Option<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("sanskriti.log")
        .build(dir)
        .map_err(|e| {
            eprintln!(
                "Cannot write logs to {:?} ({}), logging to stderr only",
                dir, e
            );
        })
        .ok()
}
