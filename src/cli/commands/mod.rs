//! CLI command implementations

pub mod cache;
pub mod config;
pub mod login;
pub mod logout;
pub mod request;

pub use cache::execute as cache;
pub use config::execute as config;
pub use login::execute as login;
pub use logout::execute as logout;
pub use request::{get, post, put, show, write};

use crate::error::AosResult;
use serde_json::Value;

/// Print a controller response as indented JSON
pub(crate) fn print_json(value: &Value) -> AosResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
