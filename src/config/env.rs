//! Environment variable overrides
//!
//! Applied on top of the config file and below command-line flags:
//! `AOS_HOST`, `AOS_PORT`, `AOS_USERNAME`, `AOS_PASSWORD`,
//! `AOS_VERIFY_TLS`, `AOS_CACHE_DIR`, `AOS_NO_CACHE`.

use crate::config::Config;
use crate::error::{AosError, AosResult};
use std::path::PathBuf;

/// Overlay any `AOS_*` variables onto `config`
pub fn apply_env_overrides(config: &mut Config) -> AosResult<()> {
    if let Some(host) = opt_env("AOS_HOST") {
        config.controller.host = host;
    }
    if let Some(port) = opt_env("AOS_PORT") {
        config.controller.port = port
            .parse()
            .map_err(|_| AosError::User(format!("invalid AOS_PORT: {}", port)))?;
    }
    if let Some(username) = opt_env("AOS_USERNAME") {
        config.controller.username = username;
    }
    // An empty password is allowed, so AOS_PASSWORD="" still overrides
    if let Ok(password) = std::env::var("AOS_PASSWORD") {
        config.controller.password = password;
    }
    if let Some(verify) = opt_env("AOS_VERIFY_TLS") {
        config.controller.verify_tls = parse_bool("AOS_VERIFY_TLS", &verify)?;
    }
    if let Some(dir) = opt_env("AOS_CACHE_DIR") {
        config.cache.dir = Some(PathBuf::from(dir));
    }
    if let Some(no_cache) = opt_env("AOS_NO_CACHE") {
        if parse_bool("AOS_NO_CACHE", &no_cache)? {
            config.cache.enabled = false;
        }
    }
    Ok(())
}

/// Parse a boolean from config or environment text
pub fn parse_bool(name: &str, value: &str) -> AosResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AosError::User(format!(
            "invalid boolean for {}: {} (use true or false)",
            name, value
        ))),
    }
}

fn opt_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
