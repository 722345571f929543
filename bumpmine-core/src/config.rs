//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/bumpmine/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/bumpmine/` (~/.config/bumpmine/)
//! - State/Logs: `$XDG_STATE_HOME/bumpmine/` (~/.local/state/bumpmine/)
//!
//! The store itself does not live under XDG: by default it sits next to the
//! executable, see [`Config::default_store_path`].

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name of the SQLite store.
pub const STORE_FILE_NAME: &str = "package_versions.db";

/// File name of the log under the state directory.
pub const LOG_FILE_NAME: &str = "bumpmine.log";

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Source repository to mine
    #[serde(default)]
    pub repository: RepositoryConfig,

    /// Store location
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Source repository settings
#[derive(Debug, Deserialize)]
pub struct RepositoryConfig {
    /// Path to the git working copy
    #[serde(default = "default_repository_path")]
    pub path: PathBuf,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            path: default_repository_path(),
        }
    }
}

fn default_repository_path() -> PathBuf {
    PathBuf::from(".")
}

/// Store settings
#[derive(Debug, Deserialize, Default)]
pub struct StoreConfig {
    /// Override for the SQLite file. Defaults to [`Config::default_store_path`].
    pub path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Deserialize)]
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

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Store path from config, falling back to [`Config::default_store_path`].
    pub fn store_path(&self) -> PathBuf {
        self.store
            .path
            .clone()
            .unwrap_or_else(Self::default_store_path)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/bumpmine/config.toml` (~/.config/bumpmine/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("bumpmine").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/bumpmine/` (~/.local/state/bumpmine/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("bumpmine")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/bumpmine/bumpmine.log` (~/.local/state/bumpmine/bumpmine.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join(LOG_FILE_NAME)
    }

    /// Returns the store path next to the running executable.
    ///
    /// Falls back to the current directory when the executable location
    /// cannot be resolved.
    pub fn default_store_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(STORE_FILE_NAME)
    }

    /// Ensure XDG base directory environment variables are set.
    ///
    /// Called by the CLI before anything reads these variables so path
    /// resolution stays stable for the whole run.
    pub fn ensure_xdg_env() {
        let home = home_dir();

        if std::env::var("XDG_STATE_HOME").is_err() {
            std::env::set_var("XDG_STATE_HOME", home.join(".local/state"));
        }

        if std::env::var("XDG_CONFIG_HOME").is_err() {
            std::env::set_var("XDG_CONFIG_HOME", home.join(".config"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.repository.path, PathBuf::from("."));
        assert!(config.store.path.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[repository]
path = "./nixpkgs"

[store]
path = "/tmp/bumps.db"

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.repository.path, PathBuf::from("./nixpkgs"));
        assert_eq!(config.store_path(), PathBuf::from("/tmp/bumps.db"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str("[logging]\nlevel = \"warn\"\n").unwrap();
        assert_eq!(config.repository.path, PathBuf::from("."));
        assert!(config.store_path().ends_with(STORE_FILE_NAME));
    }

    #[test]
    fn test_load_from_rejects_bad_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[repository\npath = 1").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_default_store_path_is_beside_executable() {
        let path = Config::default_store_path();
        let exe_dir = std::env::current_exe().unwrap();
        assert_eq!(path.parent(), exe_dir.parent());
        assert!(path.ends_with(STORE_FILE_NAME));
    }

    #[test]
    fn test_log_path_is_under_state_dir() {
        let path = Config::log_path();
        assert_eq!(path.parent(), Some(Config::state_dir().as_path()));
        assert!(path.ends_with(LOG_FILE_NAME));
    }
}
