use crate::types::ResultCode;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("RPC failure: {0}")]
    Rpc(#[from] RpcError),

    #[error("API returned error code {0}")]
    Domain(ResultCode),

    #[error("unexpected value in API reply: {0}")]
    InvalidValue(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Failures of the JSON-RPC 1.0 round trip, independent of the remote API.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The call itself is malformed (bad method name, non-positional params).
    #[error("invalid call: {0}")]
    Configuration(String),

    #[error("unable to connect to {url}: {message}")]
    Transport { url: String, message: String },

    #[error("incorrect response id (request id: {request_id}, response id: {response_id})")]
    IdMismatch {
        request_id: u64,
        response_id: serde_json::Value,
    },

    #[error("invalid JSON-RPC response: {0}")]
    InvalidResponse(String),

    /// The server filled the `error` member; carried verbatim.
    #[error("request error: {0}")]
    Remote(serde_json::Value),
}

impl RpcError {
    /// Protocol violations: the peer answered, but not with a well-formed,
    /// correlated JSON-RPC response.
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::IdMismatch { .. } | Self::InvalidResponse(_))
    }
}

impl CoreError {
    /// The domain result code, when the API itself rejected the operation.
    pub fn result_code(&self) -> Option<ResultCode> {
        match self {
            Self::Domain(code) => Some(*code),
            _ => None,
        }
    }
}
