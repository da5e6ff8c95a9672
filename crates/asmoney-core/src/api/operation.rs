use serde_json::json;

use crate::error::RpcError;
use crate::types::{BatchNumber, CURRENCY_USD};

/// Every remote method the facade knows, with its positional params.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Balance,
    TransactionInfo {
        batch: BatchNumber,
    },
    TransferBtc {
        address: String,
        amount: f64,
        memo: String,
    },
    TransferLtc {
        address: String,
        amount: f64,
        memo: String,
    },
    /// History listing, skipping `skip` records from the newest.
    History {
        skip: u64,
    },
}

impl Operation {
    pub fn method_name(&self) -> &'static str {
        match self {
            Self::Balance => "GetBalance",
            Self::TransactionInfo { .. } => "GetTransaction",
            Self::TransferBtc { .. } => "TransferBTC",
            Self::TransferLtc { .. } => "TransferLTC",
            Self::History { .. } => "GetHistory",
        }
    }

    /// Reject arguments that have no JSON encoding. A non-finite amount
    /// would otherwise serialize as `null`.
    pub fn validate(&self) -> Result<(), RpcError> {
        match self {
            Self::TransferBtc { amount, .. } | Self::TransferLtc { amount, .. }
                if !amount.is_finite() =>
            {
                Err(RpcError::Configuration(format!(
                    "{} amount must be a finite number, got {amount}",
                    self.method_name()
                )))
            }
            _ => Ok(()),
        }
    }

    pub fn params(&self) -> Vec<serde_json::Value> {
        match self {
            Self::Balance => vec![json!(CURRENCY_USD)],
            Self::TransactionInfo { batch } => vec![json!(batch)],
            Self::TransferBtc {
                address,
                amount,
                memo,
            }
            | Self::TransferLtc {
                address,
                amount,
                memo,
            } => vec![json!(address), json!(amount), json!(CURRENCY_USD), json!(memo)],
            Self::History { skip } => vec![json!(skip)],
        }
    }
}
