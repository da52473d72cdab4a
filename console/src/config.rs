use api::config::ServiceConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const ENV_BASE_URL: &str = "COUNTERSIGN_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "COUNTERSIGN_TIMEOUT_SECS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file invalid: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub session_file: PathBuf,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
            session_file: PathBuf::from(".countersign-session.json"),
        }
    }
}

impl ConsoleConfig {
    /// Load from a TOML file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Environment variables override whatever the file said.
    pub fn apply_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            if let Ok(timeout_secs) = raw.parse() {
                self.timeout_secs = timeout_secs;
            }
        }
        self
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig::new()
            .with_base_url(&self.base_url)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}
