use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::RpcError;

use super::observer::{RpcEvent, RpcObserver};
use super::protocol::{id_matches, validate_method, JsonRpcRequest, JsonRpcResponse};
use super::Transport;

/// How request ids are chosen for non-notification calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStrategy {
    /// Every request carries the same id.
    Fixed(u64),
    /// Ids count up from `start`, one per request.
    Sequential { start: u64 },
}

impl Default for IdStrategy {
    fn default() -> Self {
        Self::Fixed(1)
    }
}

enum RequestIds {
    Fixed(u64),
    Sequential(AtomicU64),
}

impl RequestIds {
    fn next(&self) -> u64 {
        match self {
            Self::Fixed(id) => *id,
            Self::Sequential(next) => next.fetch_add(1, Ordering::Relaxed),
        }
    }
}

impl From<IdStrategy> for RequestIds {
    fn from(strategy: IdStrategy) -> Self {
        match strategy {
            IdStrategy::Fixed(id) => Self::Fixed(id),
            IdStrategy::Sequential { start } => Self::Sequential(AtomicU64::new(start)),
        }
    }
}

/// Outcome of a successful [`JsonRpcClient::call`].
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The `result` member of a correlated response (`null` if absent).
    Result(serde_json::Value),
    /// A notification was posted; no response is interpreted.
    Delivered,
}

impl Reply {
    /// Unwrap the result, treating a notification as a protocol failure:
    /// callers that need a value must not run in notification mode.
    pub fn into_result(self) -> Result<serde_json::Value, RpcError> {
        match self {
            Self::Result(value) => Ok(value),
            Self::Delivered => Err(RpcError::InvalidResponse(
                "notification calls carry no result".to_owned(),
            )),
        }
    }
}

/// Generic JSON-RPC 1.0 client over a [`Transport`].
///
/// Calls are synchronous: each one builds `{method, params, id}`, posts it,
/// and validates the response before returning. No call is ever retried.
pub struct JsonRpcClient<T> {
    transport: T,
    ids: RequestIds,
    notification: bool,
    observer: Option<Arc<dyn RpcObserver>>,
}

impl<T: Transport> JsonRpcClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            ids: IdStrategy::default().into(),
            notification: false,
            observer: None,
        }
    }

    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.ids = strategy.into();
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn RpcObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Switch between requests (`false`) and notifications (`true`) for
    /// subsequent calls.
    pub fn set_notification(&mut self, notification: bool) {
        self.notification = notification;
    }

    pub fn is_notification(&self) -> bool {
        self.notification
    }

    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Call `method` with positional `params`.
    pub fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<Reply, RpcError> {
        validate_method(method).map_err(RpcError::Configuration)?;

        let id = if self.notification {
            None
        } else {
            Some(self.ids.next())
        };
        debug!(
            rpc.id = ?id,
            rpc.method = method,
            rpc.params = params.len(),
            "rpc call"
        );

        let req = JsonRpcRequest {
            method,
            params: &params,
            id,
        };
        let body = serde_json::to_string(&req)
            .map_err(|e| RpcError::Configuration(format!("serialize request: {e}")))?;
        self.emit(RpcEvent::RequestSent, &body);

        let response = self.transport.post(&body)?;
        debug!(rpc.id = ?id, rpc.method = method, body_len = response.len(), "rpc response");
        trace!(rpc.id = ?id, rpc.method = method, body = %response, "rpc response body");
        self.emit(RpcEvent::ResponseReceived, &response);

        let Some(request_id) = id else {
            return Ok(Reply::Delivered);
        };

        let decoded: JsonRpcResponse = serde_json::from_str(&response).map_err(|e| {
            RpcError::InvalidResponse(format!("decode JSON-RPC response: {e}; body={response}"))
        })?;

        if !id_matches(request_id, &decoded.id) {
            return Err(RpcError::IdMismatch {
                request_id,
                response_id: decoded.id,
            });
        }

        if let Some(err) = decoded.error {
            return Err(RpcError::Remote(err));
        }

        Ok(Reply::Result(
            decoded.result.unwrap_or(serde_json::Value::Null),
        ))
    }

    /// Like [`call`](Self::call), for params that arrive as an arbitrary JSON
    /// value. Only arrays are accepted: JSON-RPC 1.0 has no named params.
    pub fn call_value(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<Reply, RpcError> {
        match params {
            serde_json::Value::Array(params) => self.call(method, params),
            serde_json::Value::Object(_) => Err(RpcError::Configuration(
                "params must be positional; named params are not supported".to_owned(),
            )),
            other => Err(RpcError::Configuration(format!(
                "params must be given as an array, got {other}"
            ))),
        }
    }

    fn emit(&self, event: RpcEvent, payload: &str) {
        if let Some(observer) = &self.observer {
            observer.observe(event, payload);
        }
    }
}
