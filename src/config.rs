//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the banking server URL and the last used username.
//!
//! Configuration is stored at `~/.config/bankly-tui/config.json`; the
//! `BANKLY_SERVER` environment variable overrides the configured server.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/data directory paths
const APP_NAME: &str = "bankly-tui";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default server when nothing is configured (the local dev backend)
const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub server_url: Option<String>,
    pub last_username: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Resolve the server base URL: env var first, then config, then the
    /// local default. A trailing slash is stripped so endpoint paths can be
    /// appended uniformly.
    pub fn server_url(&self) -> String {
        let url = std::env::var("BANKLY_SERVER")
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| self.server_url.clone())
            .unwrap_or_else(|| DEFAULT_SERVER.to_string());
        url.trim_end_matches('/').to_string()
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the token blob and log files.
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_url_falls_back_to_default() {
        let config = Config::default();
        // Only meaningful when the env override is unset
        if std::env::var("BANKLY_SERVER").is_err() {
            assert_eq!(config.server_url(), DEFAULT_SERVER);
        }
    }

    #[test]
    fn test_server_url_strips_trailing_slash() {
        let config = Config {
            server_url: Some("https://bank.example.com/".to_string()),
            last_username: None,
        };
        if std::env::var("BANKLY_SERVER").is_err() {
            assert_eq!(config.server_url(), "https://bank.example.com");
        }
    }
}
