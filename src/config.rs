//! Session configuration loaded from YAML.

use serde::Deserialize;
use std::path::Path;

use crate::error::SessionError;

/// Behavior of a script or shell session.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Keep executing a script after a command fails
    #[serde(default = "default_true")]
    pub continue_on_error: bool,

    /// Print `Image <command> operation successful.` / `failed.` after each command
    #[serde(default = "default_true")]
    pub report_status: bool,

    /// Default tracing filter when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_true() -> bool {
    true
}

fn default_log_filter() -> String {
    "rasterlab=info".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            continue_on_error: true,
            report_status: true,
            log_filter: default_log_filter(),
        }
    }
}

impl SessionConfig {
    pub fn from_yaml(content: &str) -> Result<Self, SessionError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read and parse a YAML config file.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let config = Self::from_yaml(&std::fs::read_to_string(path)?)?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}
