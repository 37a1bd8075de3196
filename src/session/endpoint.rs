//! Controller connection settings

use std::fmt;
use std::path::PathBuf;

/// Default HTTPS port of the controller REST API
pub const DEFAULT_PORT: u16 = 4343;

/// Where and as whom to connect; fixed for the lifetime of a session
#[derive(Clone, PartialEq, Eq)]
pub struct HostEndpoint {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub verify_tls: bool,
    /// Directory for the session cache; `None` disables caching
    pub cache_dir: Option<PathBuf>,
}

impl HostEndpoint {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            username: username.into(),
            password: password.into(),
            verify_tls: false,
            cache_dir: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }

    /// API root, e.g. `https://10.0.0.1:4343/v1/`
    pub fn base_url(&self) -> String {
        // Bare IPv6 literals need brackets inside a URL
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("https://[{}]:{}/v1/", self.host, self.port)
        } else {
            format!("https://{}:{}/v1/", self.host, self.port)
        }
    }
}

impl fmt::Debug for HostEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostEndpoint")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("verify_tls", &self.verify_tls)
            .field("cache_dir", &self.cache_dir)
            .finish()
    }
}
