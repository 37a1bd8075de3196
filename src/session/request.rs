//! URL, body and response helpers shared by every controller call

use crate::error::{AosError, AosResult};
use serde_json::{Map, Value};
use tracing::debug;
use url::form_urlencoded;

/// Query parameter carrying the session token
pub const TOKEN_PARAM: &str = "UIDARUBA";
/// Query parameter asking for structured JSON output
pub const JSON_PARAM: &str = "json";
/// Query parameter narrowing the configuration node
pub const CONFIG_PATH_PARAM: &str = "config_path";

/// Endpoint running an arbitrary show command
pub const SHOW_COMMAND: &str = "showcommand";
/// Endpoint persisting the running configuration
pub const WRITE_MEMORY: &str = "write_memory";

const RESERVED_PARAMS: [&str; 3] = [TOKEN_PARAM, JSON_PARAM, CONFIG_PATH_PARAM];

/// Build `<base>configuration/<command>?UIDARUBA=..&json=1[&config_path=..][&caller params]`
///
/// Caller parameters keep their order; any that reuse a reserved name are dropped.
pub fn configuration_url(
    base_url: &str,
    command: &str,
    token: &str,
    params: &[(&str, &str)],
    config_path: Option<&str>,
) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair(TOKEN_PARAM, token);
    query.append_pair(JSON_PARAM, "1");
    if let Some(path) = config_path {
        query.append_pair(CONFIG_PATH_PARAM, path);
    }
    for (key, value) in params {
        if RESERVED_PARAMS.contains(key) {
            debug!("Ignoring reserved query parameter {}", key);
            continue;
        }
        query.append_pair(key, value);
    }

    format!("{}configuration/{}?{}", base_url, command, query.finish())
}

/// Form-encoded credentials for `api/login`
pub fn login_body(username: &str, password: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("username", username)
        .append_pair("password", password)
        .finish()
}

/// Cookie header value the controller uses for its web session
pub fn session_cookie(token: &str) -> String {
    format!("SESSION={}", token)
}

/// Decode a 200 response body; an empty body is an empty object
pub fn decode_body(body: &str, context: &str) -> AosResult<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(body).map_err(|e| AosError::decode(context, e))
}

/// Pull `_global_result.UIDARUBA` out of a login response
pub fn extract_token(response: &Value) -> Option<&str> {
    response
        .get("_global_result")?
        .get(TOKEN_PARAM)?
        .as_str()
        .filter(|token| !token.is_empty())
}
