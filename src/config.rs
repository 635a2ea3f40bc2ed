use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// =============================================================================
// Size limits
// =============================================================================

/// Default upper bound for feed manifests and their schemas (10 MiB)
pub const DEFAULT_FEED_FILE_SIZE_LIMIT: u64 = 10 * 1024 * 1024;

/// Directory name used under the data home
const APP_DIR_NAME: &str = "refoveo";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RefoveoConfig {
    pub store: StoreConfig,
    pub feed: LocalFeedConfig,
}

impl RefoveoConfig {
    /// Read a JSON config file; absent fields take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Persistent key/value store configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreConfig {
    /// Database file; defaults to [`store_path`]
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(store_path)
    }
}

/// Manifest and schema locations for a local feed
///
/// Blank paths count as not configured.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LocalFeedConfig {
    pub appversion_file: Option<PathBuf>,
    pub appversion_schema: Option<PathBuf>,
    pub appcast_file: Option<PathBuf>,
    pub appcast_schema: Option<PathBuf>,
    pub appversion_file_size_limit: u64,
    pub appversion_schema_size_limit: u64,
    pub appcast_file_size_limit: u64,
    pub appcast_schema_size_limit: u64,
}

impl Default for LocalFeedConfig {
    fn default() -> Self {
        Self {
            appversion_file: None,
            appversion_schema: None,
            appcast_file: None,
            appcast_schema: None,
            appversion_file_size_limit: DEFAULT_FEED_FILE_SIZE_LIMIT,
            appversion_schema_size_limit: DEFAULT_FEED_FILE_SIZE_LIMIT,
            appcast_file_size_limit: DEFAULT_FEED_FILE_SIZE_LIMIT,
            appcast_schema_size_limit: DEFAULT_FEED_FILE_SIZE_LIMIT,
        }
    }
}

/// Returns the path to the data directory for refoveo.
/// Uses $XDG_DATA_HOME/refoveo if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/refoveo,
/// or ./refoveo if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the key/value store database.
pub fn store_path() -> PathBuf {
    data_dir().join("registry.db")
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("refoveo.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join(APP_DIR_NAME)
}
