//! Logout command - terminate the cached session

use crate::cache::{CacheStore, FileCacheStore};
use crate::config::Config;
use crate::error::AosResult;
use crate::session::Session;
use console::style;

/// Execute the logout command
///
/// Only a session that was cached by an earlier run can be logged out;
/// without one there is nothing on the controller to terminate.
pub fn execute(config: &Config) -> AosResult<()> {
    let endpoint = config.endpoint()?;

    let has_session = endpoint.cache_dir.as_ref().is_some_and(|dir| {
        FileCacheStore::new(dir)
            .load(&endpoint.host)
            .into_record()
            .is_some_and(|record| record.is_fresh())
    });

    if !has_session {
        println!(
            "{} No cached session for {}",
            style("!").yellow(),
            style(&endpoint.host).cyan()
        );
        return Ok(());
    }

    let host = endpoint.host.clone();
    let mut session = Session::open(endpoint)?;
    let status = session.logout()?;

    if status == 200 {
        println!(
            "{} Logged out of {}",
            style("✓").green(),
            style(&host).cyan()
        );
    } else {
        println!(
            "{} Controller {} answered logout with status {}",
            style("!").yellow(),
            style(&host).cyan(),
            status
        );
    }

    Ok(())
}
