//! JSON-RPC 1.0 layer.
//!
//! Defines the [`Transport`] seam, the generic [`JsonRpcClient`] that builds,
//! sends, and validates envelopes over it, an HTTP implementation
//! ([`HttpTransport`]), and the observer hooks used for debug transcripts.
//! A canned-reply test transport lives in `mock::MockTransport`.

mod client;
mod http_adapter;
#[cfg(test)]
pub mod mock;
mod observer;
mod protocol;

pub use client::{IdStrategy, JsonRpcClient, Reply};
pub use http_adapter::{HttpSettings, HttpTransport};
pub use observer::{DebugBuffer, RpcEvent, RpcObserver};

pub(crate) use http_adapter::parse_connection;

use crate::error::RpcError;

/// Moves one serialized request to the server and brings back the raw body.
///
/// Implementations own connection handling and must map every failure to
/// establish or complete the exchange to [`RpcError::Transport`] naming
/// [`Transport::endpoint`]. They never interpret the body.
pub trait Transport: Send + Sync {
    /// The URL requests are sent to.
    fn endpoint(&self) -> &str;

    /// POST `body` as `application/json` and return the full response body.
    fn post(&self, body: &str) -> Result<String, RpcError>;
}
