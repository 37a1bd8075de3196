//! Request commands - show, get, post, put and write

use super::print_json;
use crate::cli::args::{PayloadArgs, RequestArgs, ShowArgs};
use crate::config::Config;
use crate::error::{AosError, AosResult};
use crate::session::Session;
use console::style;
use serde_json::Value;
use std::fs;

/// Execute the show command
pub fn show(args: ShowArgs, config: &Config) -> AosResult<()> {
    let session = Session::open(config.endpoint()?)?;
    print_json(&session.show(&args.command_line())?)
}

/// Execute the get command
pub fn get(args: RequestArgs, config: &Config) -> AosResult<()> {
    let session = Session::open(config.endpoint()?)?;
    let result = session.get(
        &args.command,
        &args.param_pairs(),
        args.config_path.as_deref(),
    )?;
    print_json(&result)
}

/// Execute the post command
pub fn post(args: PayloadArgs, config: &Config) -> AosResult<()> {
    let payload = read_payload(&args)?;
    let session = Session::open(config.endpoint()?)?;
    let request = &args.request;
    let result = session.post(
        &request.command,
        payload.as_ref(),
        &request.param_pairs(),
        request.config_path.as_deref(),
    )?;
    print_json(&result)
}

/// Execute the put command
pub fn put(args: PayloadArgs, config: &Config) -> AosResult<()> {
    let payload = read_payload(&args)?
        .ok_or_else(|| AosError::User("put requires --data or --data-file".to_string()))?;
    let session = Session::open(config.endpoint()?)?;
    let request = &args.request;
    let result = session.put(
        &request.command,
        &payload,
        &request.param_pairs(),
        request.config_path.as_deref(),
    )?;
    print_json(&result)
}

/// Execute the write command
pub fn write(config: &Config) -> AosResult<()> {
    let session = Session::open(config.endpoint()?)?;
    session.write()?;
    println!(
        "{} Configuration saved on {}",
        style("✓").green(),
        style(&session.endpoint().host).cyan()
    );
    Ok(())
}

/// Parse the payload from `--data` or `--data-file`
fn read_payload(args: &PayloadArgs) -> AosResult<Option<Value>> {
    if let Some(data) = &args.data {
        return serde_json::from_str(data)
            .map(Some)
            .map_err(|e| AosError::decode("--data payload", e));
    }

    if let Some(path) = &args.data_file {
        let content = fs::read_to_string(path)
            .map_err(|e| AosError::io(format!("reading payload from {}", path.display()), e))?;
        return serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| AosError::decode(format!("payload file {}", path.display()), e));
    }

    Ok(None)
}
