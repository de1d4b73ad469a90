use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::session::Identity;

/// Failure while loading an [`AppConfig`] from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings for the remote cities endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL the HTTP gateway prefixes onto every request path.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

/// Application configuration, loaded from a TOML file.
///
/// Every section is optional; omitted sections fall back to the demo
/// defaults, so an empty file yields the same configuration as no file.
///
/// ```toml
/// [api]
/// base_url = "http://localhost:8000"
///
/// [credential]
/// name = "Sajesh"
/// email = "sajesh@example.com"
/// password = "ggez"
/// avatar_url = "https://api.dicebear.com/7.x/adventurer/svg?seed=Sajesh"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    /// The one credential pair the session store accepts.
    pub credential: Identity,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            credential: Identity::demo_user(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the TOML file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
