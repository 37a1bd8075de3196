//! Login command - establish or reuse a session

use crate::cli::args::LoginArgs;
use crate::config::Config;
use crate::error::AosResult;
use crate::session::{Session, SessionSource};
use console::style;
use serde_json::{json, Value};

/// Execute the login command
pub fn execute(args: LoginArgs, config: &Config) -> AosResult<()> {
    let mut session = Session::open(config.endpoint()?)?;

    if args.force && session.source() == Some(SessionSource::Cache) {
        session.login()?;
    }

    if args.json {
        super::print_json(&summary(&session))?;
        return Ok(());
    }

    let how = match session.source() {
        Some(SessionSource::Cache) => "reused cached session",
        _ => "logged in",
    };
    println!(
        "{} {} {} as {}",
        style("✓").green(),
        style(&session.endpoint().host).cyan(),
        how,
        session.endpoint().username
    );

    Ok(())
}

fn summary(session: &Session) -> Value {
    json!({
        "host": session.endpoint().host,
        "status": session.status(),
        "source": session.source(),
        "cache_enabled": session.endpoint().cache_dir.is_some(),
    })
}
