//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "LICKLOG_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "licklog.db";

/// Default HTTP port for licklog-api
pub const DEFAULT_PORT: u16 = 5790;

/// TOML configuration file contents
///
/// Every key is optional; a missing file yields `TomlConfig::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Folder holding the database
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            port: default_port(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration, never failing
    ///
    /// An explicit path is tried first, then the platform config file.
    /// Missing or invalid files fall back to defaults. Nothing is logged
    /// here; the returned [`ConfigSource`] is logged once tracing is up.
    pub fn load(explicit: Option<&Path>) -> (Self, ConfigSource) {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => locate_config_file(),
        };

        let Some(path) = path else {
            return (Self::default(), ConfigSource::Defaults);
        };

        match Self::from_file(&path) {
            Ok(config) => (config, ConfigSource::File(path)),
            Err(e) => (
                Self::default(),
                ConfigSource::Rejected {
                    path,
                    reason: e.to_string(),
                },
            ),
        }
    }
}

/// Where a loaded [`TomlConfig`] came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No config file found
    Defaults,
    /// Parsed from this file
    File(PathBuf),
    /// File present but unreadable or invalid; defaults used instead
    Rejected { path: PathBuf, reason: String },
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::Defaults => info!("No config file found, using defaults"),
            ConfigSource::File(path) => info!("Loaded config file: {}", path.display()),
            ConfigSource::Rejected { path, reason } => {
                warn!("Ignoring config file {}: {}", path.display(), reason)
            }
        }
    }
}

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&Path>, toml_config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &toml_config.root_folder {
        return path.clone();
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Create the root folder if missing and return the database path in it
pub fn prepare_root_folder(root_folder: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(root_folder)?;
    Ok(root_folder.join(DATABASE_FILE))
}

/// Find the platform config file, user config before system config
fn locate_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("licklog").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(unix) {
        let system_config = PathBuf::from("/etc/licklog/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("licklog"))
        .unwrap_or_else(|| PathBuf::from("./licklog_data"))
}
