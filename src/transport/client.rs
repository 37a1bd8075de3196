//! Blocking HTTPS transport built on `ureq`

use super::{HttpRequest, HttpResponse, Method, Transport};
use crate::error::{AosError, AosResult};
use std::time::Duration;
use tracing::debug;
use ureq::tls::TlsConfig;
use ureq::{Agent, RequestBuilder};

/// Default per-request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport backed by a `ureq` agent
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Create a transport; controllers usually run self-signed certificates,
    /// so verification is opt-in
    pub fn new(verify_tls: bool) -> Self {
        Self::with_timeout(verify_tls, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(verify_tls: bool, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .tls_config(
                TlsConfig::builder()
                    .disable_verification(!verify_tls)
                    .build(),
            )
            .build();

        Self {
            agent: config.into(),
        }
    }
}

fn with_headers<B>(
    mut builder: RequestBuilder<B>,
    headers: &[(String, String)],
) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> AosResult<HttpResponse> {
        let url = request.url.as_str();
        debug!("{} {}", request.method, url.split('?').next().unwrap_or(url));

        let result = match request.method {
            Method::Get => with_headers(self.agent.get(url), &request.headers).call(),
            Method::Post => {
                let builder = with_headers(self.agent.post(url), &request.headers);
                match request.body.as_deref() {
                    Some(body) => builder.send(body),
                    None => builder.send_empty(),
                }
            }
            Method::Put => {
                let builder = with_headers(self.agent.put(url), &request.headers);
                match request.body.as_deref() {
                    Some(body) => builder.send(body),
                    None => builder.send_empty(),
                }
            }
        };

        let transport_err = |e: ureq::Error| AosError::Transport {
            url: url.split('?').next().unwrap_or(url).to_string(),
            reason: e.to_string(),
        };

        let mut response = result.map_err(transport_err)?;
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(transport_err)?;

        debug!("Response {} ({} bytes)", status.as_u16(), body.len());

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}
