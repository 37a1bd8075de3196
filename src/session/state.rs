//! In-memory session state

use serde::Serialize;
use std::fmt;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// No token: never logged in, or the last login failed
    Uninitialized,
    /// A token is held and attached to requests
    Active,
    /// The controller confirmed the logout
    LoggedOut,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Active => "active",
            Self::LoggedOut => "logged out",
        };
        write!(f, "{}", name)
    }
}

/// Where the current token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionSource {
    /// Restored from the session cache
    Cache,
    /// Issued by a login in this process
    FreshLogin,
}

/// Token and provenance owned by one session
///
/// Invariant: `token` is `Some` exactly when `status` is `Active`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    token: Option<String>,
    source: Option<SessionSource>,
    status: SessionStatus,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            token: None,
            source: None,
            status: SessionStatus::Uninitialized,
        }
    }
}

impl SessionState {
    pub fn activate(&mut self, token: String, source: SessionSource) {
        self.token = Some(token);
        self.source = Some(source);
        self.status = SessionStatus::Active;
    }

    /// Drop the token after a failed login
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Drop the token after a confirmed logout
    pub fn finish(&mut self) {
        self.token = None;
        self.source = None;
        self.status = SessionStatus::LoggedOut;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn source(&self) -> Option<SessionSource> {
        self.source
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }
}
