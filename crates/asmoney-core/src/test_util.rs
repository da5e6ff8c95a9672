//! Shared test helpers for `asmoney-core` unit tests.
//!
//! Builders for canned JSON-RPC response bodies and a facade wired to a
//! `MockTransport`, so facade tests only state the replies they need.

use serde_json::{json, Value};

use crate::api::Asmoney;
use crate::rpc::mock::MockTransport;

// ==============================================================================
// Response Builders
// ==============================================================================

/// A correlated JSON-RPC success carrying `result` (for the default id 1).
pub fn rpc_ok(result: Value) -> Value {
    json!({"result": result, "error": null, "id": 1})
}

/// An API reply with the OK code and the given `value`.
pub fn api_ok(value: Value) -> Value {
    rpc_ok(json!({"result": 0, "value": value}))
}

/// An API reply rejected with `code`.
pub fn api_code(code: i64) -> Value {
    rpc_ok(json!({"result": code, "value": null}))
}

// ==============================================================================
// Facade Builders
// ==============================================================================

/// A facade for account `merchant` that answers with `replies` in order.
pub fn api_replying(replies: Vec<Value>) -> Asmoney<MockTransport> {
    let transport = replies
        .into_iter()
        .fold(MockTransport::builder(), |builder, reply| {
            builder.reply_json(reply)
        })
        .build();
    Asmoney::with_transport(transport, "merchant")
}

/// `(method, params)` of every request the facade has sent.
pub fn sent_calls(api: &Asmoney<MockTransport>) -> Vec<(String, Value)> {
    api.rpc()
        .transport()
        .sent()
        .into_iter()
        .map(|req| {
            let method = req["method"].as_str().unwrap_or_default().to_owned();
            (method, req["params"].clone())
        })
        .collect()
}
