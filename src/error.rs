//! Error types for aossession
//!
//! All modules use `AosResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for aossession operations
pub type AosResult<T> = Result<T, AosError>;

/// All errors that can occur in aossession
#[derive(Error, Debug)]
pub enum AosError {
    // Cache errors (never escalated by the session manager)
    #[error("Failed to read session cache {path}: {reason}")]
    CacheRead { path: PathBuf, reason: String },

    #[error("Failed to write session cache {path}: {source}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Controller errors
    #[error("Authentication failed (status {status}): {reason}")]
    Authentication { status: u16, reason: String },

    #[error("HTTP error {status}: {reason}")]
    Http {
        status: u16,
        reason: String,
        headers: Vec<(String, String)>,
    },

    #[error("Failed to decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("No active session, log in first")]
    NotLoggedIn,

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Controller {0} not configured")]
    ConfigMissing(&'static str),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("{0}")]
    User(String),
}

impl AosError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a decode error with context
    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            context: context.into(),
            source,
        }
    }

    /// HTTP status carried by the error, if it came from the controller
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } | Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Authentication { status: 401, .. } => {
                Some("Check the username and password (AOS_USERNAME / AOS_PASSWORD)")
            }
            Self::Authentication { .. } => Some("Verify the controller accepts API logins"),
            Self::Http { status: 401, .. } => {
                Some("The session may have expired on the controller. Run: aossession login")
            }
            Self::NotLoggedIn => Some("Run: aossession login"),
            Self::ConfigMissing(_) => {
                Some("Set it in the config file, the environment, or with a command-line flag")
            }
            Self::Transport { .. } => {
                Some("Check the host and port, or pass --verify-tls only with a trusted certificate")
            }
            _ => None,
        }
    }
}
