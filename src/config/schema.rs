//! Configuration schema for aossession
//!
//! Configuration is stored at `~/.config/aossession/config.toml`

use crate::config::ConfigManager;
use crate::error::{AosError, AosResult};
use crate::session::{HostEndpoint, DEFAULT_PORT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Controller connection
    pub controller: ControllerConfig,

    /// Session cache settings
    pub cache: CacheConfig,
}

impl Config {
    /// Build the endpoint for a session, checking required fields
    pub fn endpoint(&self) -> AosResult<HostEndpoint> {
        let controller = &self.controller;
        if controller.host.trim().is_empty() {
            return Err(AosError::ConfigMissing("host"));
        }
        if controller.username.trim().is_empty() {
            return Err(AosError::ConfigMissing("username"));
        }

        let mut endpoint = HostEndpoint::new(
            controller.host.trim(),
            controller.username.as_str(),
            controller.password.as_str(),
        )
        .with_port(controller.port)
        .with_verify_tls(controller.verify_tls);

        if let Some(dir) = self.cache.resolved_dir() {
            endpoint = endpoint.with_cache_dir(dir);
        }

        Ok(endpoint)
    }

    /// Copy safe for display, with secrets replaced by `***`
    pub fn redacted(&self) -> Self {
        let mut redacted = self.clone();
        if !redacted.controller.password.is_empty() {
            redacted.controller.password = "***".to_string();
        }
        redacted
    }
}

/// General application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Controller connection settings
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Controller or mobility conductor hostname / IP
    pub host: String,

    /// REST API port
    pub port: u16,

    /// API user
    pub username: String,

    /// API password (prefer AOS_PASSWORD over storing it here)
    pub password: String,

    /// Verify the controller's TLS certificate
    pub verify_tls: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            username: String::new(),
            password: String::new(),
            verify_tls: false,
        }
    }
}

impl fmt::Debug for ControllerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("verify_tls", &self.verify_tls)
            .finish()
    }
}

/// Session cache configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Reuse session tokens across invocations (default: true)
    pub enabled: bool,

    /// Cache directory (default: `~/.cache/aossession`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

impl CacheConfig {
    /// Directory to cache in, or `None` when caching is off
    pub fn resolved_dir(&self) -> Option<PathBuf> {
        if !self.enabled {
            return None;
        }
        Some(
            self.dir
                .clone()
                .unwrap_or_else(ConfigManager::default_cache_dir),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[controller]"));
        assert!(toml.contains("port = 4343"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.controller.port, 4343);
        assert!(config.cache.enabled);
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [controller]
            host = "10.0.0.5"
            username = "api"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.controller.host, "10.0.0.5");
        assert_eq!(config.controller.port, 4343); // default preserved
        assert_eq!(config.general.log_format, "text");
    }

    #[test]
    fn endpoint_requires_host_and_username() {
        let mut config = Config::default();
        assert!(matches!(
            config.endpoint(),
            Err(AosError::ConfigMissing("host"))
        ));

        config.controller.host = "ctrl".to_string();
        assert!(matches!(
            config.endpoint(),
            Err(AosError::ConfigMissing("username"))
        ));

        config.controller.username = "admin".to_string();
        let endpoint = config.endpoint().unwrap();
        assert_eq!(endpoint.host, "ctrl");
        assert_eq!(endpoint.port, 4343);
    }

    #[test]
    fn endpoint_cache_dir_follows_cache_settings() {
        let mut config = Config::default();
        config.controller.host = "ctrl".to_string();
        config.controller.username = "admin".to_string();
        config.cache.dir = Some(PathBuf::from("/tmp/aos"));

        assert_eq!(
            config.endpoint().unwrap().cache_dir,
            Some(PathBuf::from("/tmp/aos"))
        );

        config.cache.enabled = false;
        assert!(config.endpoint().unwrap().cache_dir.is_none());
    }

    #[test]
    fn redacted_hides_password() {
        let mut config = Config::default();
        config.controller.password = "hunter2".to_string();

        let toml = toml::to_string_pretty(&config.redacted()).unwrap();
        assert!(!toml.contains("hunter2"));
        assert!(toml.contains("***"));
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
