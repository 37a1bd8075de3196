//! Session management module

pub mod endpoint;
pub mod manager;
pub mod request;
pub mod state;

pub use endpoint::{HostEndpoint, DEFAULT_PORT};
pub use manager::Session;
pub use state::{SessionSource, SessionState, SessionStatus};
