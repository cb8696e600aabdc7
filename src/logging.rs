//! Logging Setup
//!
//! The terminal belongs to the UI, so events go to a file.

use std::fs::OpenOptions;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::{CodeFieldError, Result};

/// Install the global subscriber; keep the guard alive until exit to flush
pub fn init(log_file: &Path) -> Result<WorkerGuard> {
    let logging_error = |source| CodeFieldError::Logging { path: log_file.to_path_buf(), source };

    if let Some(dir) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(logging_error)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_file).map_err(logging_error)?;

    let (writer, guard) = tracing_appender::non_blocking(file);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
