//! Cache command - inspect or clear the session cache

use crate::cache::{CacheLookup, CacheStore, FileCacheStore, SESSION_TIMEOUT_SECS};
use crate::cli::args::{CacheAction, CacheArgs};
use crate::config::Config;
use crate::error::{AosError, AosResult};
use chrono::Utc;
use console::style;

/// Execute the cache command
pub fn execute(args: CacheArgs, config: &Config) -> AosResult<()> {
    let host = config.controller.host.trim();
    if host.is_empty() {
        return Err(AosError::ConfigMissing("host"));
    }

    let Some(dir) = config.cache.resolved_dir() else {
        println!("{} Session cache is disabled", style("!").yellow());
        return Ok(());
    };
    let store = FileCacheStore::new(dir);

    match args.action {
        CacheAction::Status => show_status(&store, host),
        CacheAction::Clear => {
            store.clear(host)?;
            println!(
                "{} Cleared cached session for {}",
                style("✓").green(),
                style(host).cyan()
            );
        }
        CacheAction::Path => println!("{}", store.path_for(host).display()),
    }

    Ok(())
}

fn show_status(store: &FileCacheStore, host: &str) {
    match store.load(host) {
        CacheLookup::Hit(record) => {
            let age = record.age_at(Utc::now()).num_seconds();
            let issued = record.issued_at.format("%Y-%m-%d %H:%M:%S UTC");
            if record.is_fresh() {
                println!(
                    "{} {} cached session from {} ({}s old, reusable for {}s)",
                    style("✓").green(),
                    style(host).cyan(),
                    issued,
                    age,
                    SESSION_TIMEOUT_SECS - age
                );
            } else {
                println!(
                    "{} {} cached session from {} is stale ({}s old), next run logs in",
                    style("!").yellow(),
                    style(host).cyan(),
                    issued,
                    age
                );
            }
        }
        CacheLookup::Miss => {
            println!("No cached session for {}", style(host).cyan());
        }
        CacheLookup::Unreadable(reason) => {
            println!(
                "{} Cache file {} is unreadable ({}), next run logs in",
                style("!").yellow(),
                store.path_for(host).display(),
                reason
            );
        }
    }
}
