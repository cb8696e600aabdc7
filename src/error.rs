//! Error Types
//!
//! The widget itself never fails; these cover the ambient surfaces around it.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodeFieldError {
    #[error("Failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to open log file {path}: {source}")]
    Logging {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOTP error: {0}")]
    Totp(String),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),
}

pub type Result<T> = std::result::Result<T, CodeFieldError>;
