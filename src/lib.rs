//! aossession - ArubaOS 8 REST session client
//!
//! Authenticates against a controller or mobility conductor, caches the
//! session token on disk between runs, and sends GET/PUT/POST requests to
//! the `/v1/configuration` API with the token attached.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod session;
pub mod transport;

pub use error::{AosError, AosResult};
pub use session::{HostEndpoint, Session};
