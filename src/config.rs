//! Dashboard configuration.
//!
//! The config is a JSON document listing the services to poll:
//!
//! ```json
//! {
//!   "refresh_interval": "30s",
//!   "services": [
//!     {
//!       "url": "https://api.example.com/health",
//!       "title": "Example API",
//!       "headers": ["Authorization: Bearer {API_TOKEN}"],
//!       "refresh_interval": "10s",
//!       "selectors": [{ "name": "status", "value": "data.status" }]
//!     }
//!   ]
//! }
//! ```
//!
//! It is loaded once at startup and never mutated afterwards.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// File name looked up when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "charming_config.json";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalConfig {
    /// Default refresh interval for services without their own.
    #[serde(default)]
    pub refresh_interval: Option<String>,
    #[serde(default)]
    pub services: Vec<ServiceSpec>,
}

/// One polled endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceSpec {
    pub url: String,
    pub title: String,
    /// Raw `Key: Value` lines. A value written as `{NAME}` is replaced with
    /// the `NAME` environment variable at fetch time.
    #[serde(default)]
    pub headers: Vec<String>,
    /// Overrides [`GlobalConfig::refresh_interval`].
    #[serde(default)]
    pub refresh_interval: Option<String>,
    #[serde(default)]
    pub selectors: Vec<Selector>,
}

/// A named JSON path extracted from each response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Selector {
    pub name: String,
    #[serde(rename = "value", alias = "path")]
    pub path: String,
}

impl Selector {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Errors raised while locating or reading the config file.
#[derive(Debug)]
pub enum ConfigError {
    /// No config file in any of the searched locations.
    NotFound { searched: Vec<PathBuf> },
    /// The file exists but could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is not a valid config document.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound { searched } => {
                let paths: Vec<String> = searched.iter().map(|p| p.display().to_string()).collect();
                write!(f, "config file not found (searched: {})", paths.join(", "))
            }
            ConfigError::Io { path, source } => {
                write!(f, "cannot read '{}': {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid config '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::NotFound { .. } => None,
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

/// Locates `filename` in the current working directory, then in the
/// user's home directory.
pub fn find_config(filename: &str) -> Result<PathBuf, ConfigError> {
    let mut candidates = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(filename));
    }
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(filename));
    }
    find_in(&candidates)
}

fn find_in(candidates: &[PathBuf]) -> Result<PathBuf, ConfigError> {
    candidates
        .iter()
        .find(|p| p.is_file())
        .cloned()
        .ok_or_else(|| ConfigError::NotFound {
            searched: candidates.to_vec(),
        })
}

/// Reads and parses a config file.
pub fn load_config(path: &Path) -> Result<GlobalConfig, ConfigError> {
    let file = File::open(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
