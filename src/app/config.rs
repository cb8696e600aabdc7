use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CodeFieldError, Result};
use crate::field::CodeFieldConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub field: CodeFieldConfig,
    /// Base32 secret or otpauth:// URI to check completed codes against
    pub totp_secret: Option<String>,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let log_file = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("code-field")
            .join("code-field.log");

        Self {
            field: CodeFieldConfig::default(),
            totp_secret: None,
            log_file,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("code-field")
            .join("config.json")
    }

    /// Read `path`, or the default location; a missing default file means defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let explicit = path.is_some();
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);

        match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| CodeFieldError::ConfigParse { path, source }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !explicit => Ok(Self::default()),
            Err(source) => Err(CodeFieldError::ConfigIo { path, source }),
        }
    }
}
