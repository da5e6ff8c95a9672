//! HTTP transport for JSON-RPC.
//!
//! Implements [`Transport`](super::Transport) with a blocking `reqwest`
//! client: one POST per call, request and connect timeouts, optional basic
//! auth, and no idle connection reuse between calls.

mod connection;
mod transport;

pub(crate) use connection::parse_connection;
pub use transport::{HttpSettings, HttpTransport};
