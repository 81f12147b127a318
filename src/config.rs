//! Server configuration, loaded from TOML.
//!
//! Every field is optional in the file; missing values take the defaults
//! below. The `[crawl]` table maps onto [`mention_search::CrawlConfig`].

use crate::error::{Result, ServerError};
use mention_search::CrawlConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the mention-scout HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind. `0` picks a free port.
    pub port: u16,
    /// CORS origins allowed to call the API. Empty allows any origin.
    pub allowed_origins: Vec<String>,
    /// Search core settings.
    pub crawl: CrawlConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5000,
            allowed_origins: Vec::new(),
            crawl: CrawlConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Returns the default config file path: `~/.config/mention-scout/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("mention-scout").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("mention-scout")
                .join("config.toml")
        } else {
            PathBuf::from("mention-scout.toml")
        }
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is blank, an allowed origin is not a
    /// valid header value, or the crawl settings are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ServerError::Config("host must not be empty".into()));
        }
        if let Some(bad) = self
            .allowed_origins
            .iter()
            .find(|o| axum::http::HeaderValue::from_str(o).is_err())
        {
            return Err(ServerError::Config(format!("invalid allowed origin: {bad}")));
        }
        self.crawl.validate()?;
        Ok(())
    }
}
