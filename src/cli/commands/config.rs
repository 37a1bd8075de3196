//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::env::parse_bool;
use crate::config::{Config, ConfigManager};
use crate::error::{AosError, AosResult};
use console::style;
use std::path::PathBuf;

/// Execute the config command
pub fn execute(args: ConfigArgs, manager: &ConfigManager, config: &Config) -> AosResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config),
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => init_config(manager, force)?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, &key, &value)?,
    }

    Ok(())
}

fn show_config(config: &Config) {
    let toml = toml::to_string_pretty(&config.redacted())
        .unwrap_or_else(|_| "Error serializing config".to_string());
    println!("{}", toml);
}

fn init_config(manager: &ConfigManager, force: bool) -> AosResult<()> {
    let path = manager.path();

    if path.exists() && !force {
        println!(
            "{} Config already exists at {} (use --force to overwrite)",
            style("!").yellow(),
            path.display()
        );
        return Ok(());
    }

    manager.save(&Config::default())?;
    println!(
        "{} Configuration initialized ({})",
        style("✓").green(),
        path.display()
    );

    Ok(())
}

fn set_value(manager: &ConfigManager, key: &str, value: &str) -> AosResult<()> {
    // Edit the file contents only, so env and flag overrides are not persisted
    let mut config = manager.load()?;
    apply_setting(&mut config, key, value)?;
    manager.save(&config)?;

    let shown = if key == "controller.password" { "***" } else { value };
    println!("{} Set {} = {}", style("✓").green(), key, shown);
    Ok(())
}

/// Assign a dot-separated config key
fn apply_setting(config: &mut Config, key: &str, value: &str) -> AosResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "log_format"] => match value {
            "text" | "json" => config.general.log_format = value.to_string(),
            _ => {
                return Err(AosError::User(format!(
                    "invalid log_format: {} (use text or json)",
                    value
                )))
            }
        },
        ["controller", "host"] => config.controller.host = value.to_string(),
        ["controller", "port"] => {
            config.controller.port = value
                .parse()
                .map_err(|_| AosError::User(format!("invalid port: {}", value)))?
        }
        ["controller", "username"] => config.controller.username = value.to_string(),
        ["controller", "password"] => config.controller.password = value.to_string(),
        ["controller", "verify_tls"] => config.controller.verify_tls = parse_bool(key, value)?,
        ["cache", "enabled"] => config.cache.enabled = parse_bool(key, value)?,
        ["cache", "dir"] => {
            config.cache.dir = if value.is_empty() {
                None
            } else {
                Some(PathBuf::from(value))
            }
        }
        _ => return Err(AosError::User(format!("Unknown config key: {}", key))),
    }

    Ok(())
}
