//! Authenticated session against one controller
//!
//! A [`Session`] owns the token lifecycle and is the only path through which
//! requests reach the controller. On construction it reuses a fresh cached
//! token when one exists and logs in otherwise. Calls are blocking and a
//! session is meant to be driven by one thread at a time.

use crate::cache::{CacheLookup, CacheStore, FileCacheStore, SessionRecord};
use crate::error::{AosError, AosResult};
use crate::session::endpoint::HostEndpoint;
use crate::session::request::{
    configuration_url, decode_body, extract_token, login_body, session_cookie, SHOW_COMMAND,
    WRITE_MEMORY,
};
use crate::session::state::{SessionSource, SessionState, SessionStatus};
use crate::transport::{HttpRequest, HttpResponse, Method, Transport, UreqTransport};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Session manager for a single controller
pub struct Session {
    endpoint: HostEndpoint,
    base_url: String,
    transport: Box<dyn Transport>,
    cache: Option<Box<dyn CacheStore>>,
    state: SessionState,
}

impl Session {
    /// Connect with the HTTPS transport and, if `cache_dir` is set, a file cache
    pub fn open(endpoint: HostEndpoint) -> AosResult<Self> {
        let transport = Box::new(UreqTransport::new(endpoint.verify_tls));
        let cache = endpoint
            .cache_dir
            .clone()
            .map(|dir| Box::new(FileCacheStore::new(dir)) as Box<dyn CacheStore>);
        Self::connect(endpoint, transport, cache)
    }

    /// Connect with explicit collaborators
    ///
    /// Returns an authentication error when no cached token is usable and
    /// the login is rejected.
    pub fn connect(
        endpoint: HostEndpoint,
        transport: Box<dyn Transport>,
        cache: Option<Box<dyn CacheStore>>,
    ) -> AosResult<Self> {
        let mut session = Self {
            base_url: endpoint.base_url(),
            endpoint,
            transport,
            cache,
            state: SessionState::default(),
        };

        if !session.restore_from_cache() {
            session.login()?;
        }

        Ok(session)
    }

    fn restore_from_cache(&mut self) -> bool {
        let Some(cache) = &self.cache else {
            return false;
        };
        let host = &self.endpoint.host;

        match cache.load(host) {
            CacheLookup::Hit(record) if !record.has_token() => {
                warn!("Ignoring cached session for {} without a token", host);
                false
            }
            CacheLookup::Hit(record) if record.is_fresh() => {
                info!("Reusing cached session for {}", host);
                self.state.activate(record.token, SessionSource::Cache);
                true
            }
            CacheLookup::Hit(record) => {
                debug!(
                    "Cached session for {} is stale ({}s old)",
                    host,
                    record.age_at(chrono::Utc::now()).num_seconds()
                );
                false
            }
            CacheLookup::Miss => {
                debug!("No cached session for {}", host);
                false
            }
            CacheLookup::Unreadable(reason) => {
                warn!("Ignoring unreadable session cache for {}: {}", host, reason);
                false
            }
        }
    }

    /// Authenticate with username and password
    ///
    /// On success the new token replaces any previous one and is written to
    /// the cache. On failure the session is left without a token.
    pub fn login(&mut self) -> AosResult<()> {
        let request = HttpRequest::new(Method::Post, format!("{}api/login", self.base_url))
            // The controller expects this header even though the body is form-encoded
            .header("Content-Type", "application/json")
            .body(login_body(&self.endpoint.username, &self.endpoint.password));

        let result = self
            .transport
            .execute(request)
            .and_then(|response| Self::token_from_login(&response));

        let token = match result {
            Ok(token) => token,
            Err(e) => {
                self.state.reset();
                warn!("Login to {} failed: {}", self.endpoint.host, e);
                return Err(e);
            }
        };

        info!("Logged in to {} as {}", self.endpoint.host, self.endpoint.username);
        self.persist(&token);
        self.state.activate(token, SessionSource::FreshLogin);
        Ok(())
    }

    fn token_from_login(response: &HttpResponse) -> AosResult<String> {
        if !response.is_ok() {
            return Err(AosError::Authentication {
                status: response.status,
                reason: failure_reason(response),
            });
        }

        let body = decode_body(&response.body, "login response")?;
        extract_token(&body)
            .map(str::to_string)
            .ok_or_else(|| AosError::Authentication {
                status: response.status,
                reason: "response did not contain a session token".to_string(),
            })
    }

    fn persist(&self, token: &str) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.save(&self.endpoint.host, &SessionRecord::new(token)) {
                warn!("Could not cache session for {}: {}", self.endpoint.host, e);
            }
        }
    }

    /// Terminate the session on the controller
    ///
    /// Returns the HTTP status of the logout call whatever it is. Only a 200
    /// drops the token and clears the cache; otherwise the session stays as
    /// it was so the logout can be retried. `Err` means no response arrived.
    pub fn logout(&mut self) -> AosResult<u16> {
        let mut request = HttpRequest::new(Method::Get, format!("{}api/logout", self.base_url));
        if let Some(token) = self.state.token() {
            request = request.header("Cookie", session_cookie(token));
        }

        let response = self.transport.execute(request)?;

        if response.is_ok() {
            self.state.finish();
            if let Some(cache) = &self.cache {
                if let Err(e) = cache.clear(&self.endpoint.host) {
                    warn!("Could not clear session cache for {}: {}", self.endpoint.host, e);
                }
            }
            info!("Logged out of {}", self.endpoint.host);
        } else {
            warn!(
                "Logout from {} returned {} {}",
                self.endpoint.host, response.status, response.reason
            );
        }

        Ok(response.status)
    }

    /// GET `configuration/<command>`
    pub fn get(
        &self,
        command: &str,
        params: &[(&str, &str)],
        config_path: Option<&str>,
    ) -> AosResult<Value> {
        self.dispatch(Method::Get, command, params, config_path, None)
    }

    /// POST `configuration/<command>`, with a JSON body when `payload` is given
    pub fn post(
        &self,
        command: &str,
        payload: Option<&Value>,
        params: &[(&str, &str)],
        config_path: Option<&str>,
    ) -> AosResult<Value> {
        self.dispatch(Method::Post, command, params, config_path, payload)
    }

    /// PUT `configuration/<command>` with a JSON body
    pub fn put(
        &self,
        command: &str,
        payload: &Value,
        params: &[(&str, &str)],
        config_path: Option<&str>,
    ) -> AosResult<Value> {
        self.dispatch(Method::Put, command, params, config_path, Some(payload))
    }

    /// Run a CLI show command, e.g. `show version`
    pub fn show(&self, command: &str) -> AosResult<Value> {
        self.get(SHOW_COMMAND, &[("command", command)], None)
    }

    /// Save the running configuration (`write memory`)
    pub fn write(&self) -> AosResult<()> {
        self.post(WRITE_MEMORY, None, &[], None).map(|_| ())
    }

    fn dispatch(
        &self,
        method: Method,
        command: &str,
        params: &[(&str, &str)],
        config_path: Option<&str>,
        payload: Option<&Value>,
    ) -> AosResult<Value> {
        let token = match (self.state.status(), self.state.token()) {
            (SessionStatus::Active, Some(token)) => token,
            _ => return Err(AosError::NotLoggedIn),
        };

        let url = configuration_url(&self.base_url, command, token, params, config_path);
        let mut request = HttpRequest::new(method, url).header("Cookie", session_cookie(token));
        if let Some(payload) = payload {
            request = request
                .header("Content-Type", "application/json")
                .body(serde_json::to_string(payload)?);
        }

        debug!("{} configuration/{}", method, command);
        let response = self.transport.execute(request)?;

        if !response.is_ok() {
            return Err(AosError::Http {
                status: response.status,
                reason: failure_reason(&response),
                headers: response.headers,
            });
        }

        decode_body(&response.body, command)
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status()
    }

    pub fn source(&self) -> Option<SessionSource> {
        self.state.source()
    }

    pub fn is_active(&self) -> bool {
        self.state.status() == SessionStatus::Active
    }

    /// Current session token, if any
    pub fn token(&self) -> Option<&str> {
        self.state.token()
    }

    pub fn endpoint(&self) -> &HostEndpoint {
        &self.endpoint
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Reason phrase, falling back to the start of the body
fn failure_reason(response: &HttpResponse) -> String {
    if !response.reason.is_empty() {
        return response.reason.clone();
    }
    response.body.trim().chars().take(200).collect()
}
