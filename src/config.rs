//! Configuration handling for the form client

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default form server origin
pub const DEFAULT_SERVER_URL: &str = "https://test.superhero.hu";

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Environment variable overriding the server origin
pub const SERVER_URL_ENV: &str = "DYNFORM_SERVER_URL";

/// User configuration for the form client
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormConfig {
    /// Form server origin
    pub server_url: Option<String>,
    /// Timeout applied to every request, in seconds
    pub request_timeout_secs: Option<u64>,
}

impl FormConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("hu", "superhero", "dynform-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            if !url.trim().is_empty() {
                tracing::debug!("Using server url from {SERVER_URL_ENV}");
                config.server_url = Some(url);
            }
        }

        Ok(config)
    }

    pub fn server_url(&self) -> &str {
        self.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }
}
