use serde::{Deserialize, Serialize};

/// JSON-RPC 1.0 request. `id` serializes as `null` for notifications.
#[derive(Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) method: &'a str,
    pub(super) params: &'a [serde_json::Value],
    pub(super) id: Option<u64>,
}

#[derive(Deserialize)]
pub(super) struct JsonRpcResponse {
    #[serde(default)]
    pub(super) result: Option<serde_json::Value>,
    #[serde(default)]
    pub(super) error: Option<serde_json::Value>,
    #[serde(default)]
    pub(super) id: serde_json::Value,
}

/// Whether a response `id` correlates with the request id. Servers that echo
/// the id back as a decimal string are accepted.
pub(super) fn id_matches(request_id: u64, response_id: &serde_json::Value) -> bool {
    if let Some(n) = response_id.as_u64() {
        return n == request_id;
    }

    response_id
        .as_str()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .is_some_and(|n| n == request_id)
}

/// Method names are sent verbatim, so they must be a single non-empty token.
pub(super) fn validate_method(method: &str) -> Result<(), String> {
    if method.is_empty() {
        return Err("method name must not be empty".to_owned());
    }
    if method.chars().any(char::is_whitespace) {
        return Err(format!("method name `{method}` must not contain whitespace"));
    }
    Ok(())
}
