//! Client configuration.
//!
//! Resolution order for the service base URL:
//! 1. `GIRON_API_URL` environment variable
//! 2. `~/.config/giron/config.toml`
//! 3. `http://localhost:8000`

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use giron_core::error::{GironError, Result};

/// Default discussion-service endpoint.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default delay between persona turns, in seconds.
const DEFAULT_TURN_INTERVAL_SECS: u64 = 5;

/// Connection settings for the discussion service.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the discussion service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Delay between persona turns, in seconds.
    #[serde(default = "default_turn_interval_secs")]
    pub turn_interval_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_turn_interval_secs() -> u64 {
    DEFAULT_TURN_INTERVAL_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            turn_interval_secs: default_turn_interval_secs(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the config file and environment.
    ///
    /// A missing config file is not an error; a malformed one is.
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::load_from_path(&path)?,
            _ => Self::default(),
        };

        if let Ok(url) = env::var("GIRON_API_URL")
            && !url.trim().is_empty()
        {
            config.base_url = url;
        }

        Ok(config)
    }

    /// Loads configuration from an explicit TOML file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GironError::config(format!(
                "Failed to read configuration file at {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Delay between persona turns.
    pub fn turn_interval(&self) -> Duration {
        Duration::from_secs(self.turn_interval_secs)
    }
}

/// Returns the path to the configuration file: ~/.config/giron/config.toml
fn config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("giron").join("config.toml"))
}
