//! Domain types for the ASMoney API.
//!
//! Contains the domain result code (`ResultCode`), the batch number newtype
//! returned by transfers, and the `{result, value}` reply envelope every
//! remote method answers with.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Settlement currency sent with balance and transfer calls.
pub const CURRENCY_USD: &str = "USD";

// ==============================================================================
// Result Code
// ==============================================================================

/// Application-level status returned in the `result` member of every reply.
///
/// Only [`ResultCode::OK`] is interpreted here. Every other value is handed
/// back to the caller untouched inside [`CoreError::Domain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultCode(pub i64);

impl ResultCode {
    pub const OK: ResultCode = ResultCode(0);

    pub fn is_ok(self) -> bool {
        self == Self::OK
    }
}

impl std::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ResultCode {
    fn from(code: i64) -> Self {
        Self(code)
    }
}

// ==============================================================================
// Batch Number
// ==============================================================================

/// Identifier the API assigns to a transfer.
///
/// `#[serde(transparent)]` keeps the outgoing JSON a bare integer, which is
/// what `GetTransaction` expects as its only parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BatchNumber(pub u64);

impl BatchNumber {
    /// Decode a batch number from a reply value. Some deployments send it as
    /// a decimal string rather than a JSON number.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, CoreError> {
        if let Some(n) = value.as_u64() {
            return Ok(Self(n));
        }

        if let Some(s) = value.as_str() {
            return s
                .trim()
                .parse::<u64>()
                .map(Self)
                .map_err(|e| CoreError::InvalidValue(format!("invalid batch number string: {e}")));
        }

        Err(CoreError::InvalidValue(format!(
            "invalid batch number: {value}"
        )))
    }
}

impl From<u64> for BatchNumber {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

impl std::fmt::Display for BatchNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ==============================================================================
// Reply Envelope
// ==============================================================================

/// The `{result, value}` object carried in a successful JSON-RPC `result`.
/// This is distinct from the JSON-RPC envelope: a JSON-RPC success can still
/// carry a failing domain code.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiReply {
    pub result: ResultCode,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl ApiReply {
    /// Return `value` when the code is OK, otherwise the code as an error.
    pub fn into_value(self) -> Result<serde_json::Value, CoreError> {
        if self.result.is_ok() {
            Ok(self.value)
        } else {
            Err(CoreError::Domain(self.result))
        }
    }
}
