//! Configuration management for aossession

pub mod env;
pub mod schema;

pub use env::apply_env_overrides;
pub use schema::Config;

use crate::error::{AosError, AosResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("aossession")
            .join("config.toml")
    }

    /// Get the default session cache directory
    pub fn default_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("aossession")
    }

    /// Load configuration, using defaults if the file does not exist
    pub fn load(&self) -> AosResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(&self, path: &Path) -> AosResult<Config> {
        let content = fs::read_to_string(path)
            .map_err(|e| AosError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| AosError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load the file, then apply `AOS_*` environment overrides
    pub fn load_with_env(&self) -> AosResult<Config> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, config: &Config) -> AosResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AosError::io(format!("creating config directory {}", parent.display()), e)
            })?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).map_err(|e| {
            AosError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        // May contain the controller password
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.config_path, fs::Permissions::from_mode(0o600))
                .map_err(|e| AosError::io("setting config file permissions", e))?;
        }

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
