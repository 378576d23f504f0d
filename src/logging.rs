//! File logging. The terminal belongs to the UI, so nothing is written to it.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::{NewsTuiError, Result};

pub const LOG_FILE_NAME: &str = "newstui.log";

/// Log to `dir/newstui.log`, filtered by `RUST_LOG` (default `info`).
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init_logging(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| NewsTuiError::Config(format!("Failed to initialise logging: {e}")))?;
    Ok(guard)
}
