//! ASMoney service facade.
//!
//! [`Asmoney`] maps each API operation onto one JSON-RPC call and unwraps the
//! `{result, value}` reply: an OK code yields the value decoded into the
//! operation's success type, any other code becomes [`CoreError::Domain`].

mod operation;

pub use operation::Operation;

use std::sync::Arc;

use tracing::{debug, info_span};

use crate::config::Config;
use crate::error::CoreError;
use crate::rpc::{HttpSettings, HttpTransport, JsonRpcClient, RpcObserver, Transport};
use crate::types::{ApiReply, BatchNumber};

pub struct Asmoney<T = HttpTransport> {
    rpc: JsonRpcClient<T>,
    account: String,
}

impl Asmoney<HttpTransport> {
    /// Build a client that talks HTTP to `config.endpoint`, authenticating
    /// with the configured API name and password.
    pub fn new(config: &Config) -> Result<Self, CoreError> {
        let transport = HttpTransport::new(
            &config.endpoint,
            HttpSettings {
                timeout: config.timeout,
                connect_timeout: config.connect_timeout,
                user: Some(config.api_name.clone()),
                pass: Some(config.api_password.clone()),
            },
        )?;
        Ok(Self::with_transport(transport, &config.username))
    }
}

impl<T: Transport> Asmoney<T> {
    pub fn with_transport(transport: T, account: &str) -> Self {
        Self {
            rpc: JsonRpcClient::new(transport),
            account: account.to_owned(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn RpcObserver>) -> Self {
        self.rpc = self.rpc.with_observer(observer);
        self
    }

    /// The account (username) this client acts for.
    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn rpc(&self) -> &JsonRpcClient<T> {
        &self.rpc
    }

    /// Run one operation and return the raw `value` of an OK reply.
    pub fn execute(&self, op: &Operation) -> Result<serde_json::Value, CoreError> {
        let method = op.method_name();
        let _span = info_span!("asmoney", account = %self.account, method).entered();
        op.validate()?;

        let result = self.rpc.call(method, op.params())?.into_result()?;
        let reply: ApiReply = serde_json::from_value(result).map_err(|e| {
            CoreError::InvalidValue(format!("{method} reply is not a result/value object: {e}"))
        })?;
        debug!(code = %reply.result, "api reply");

        reply.into_value()
    }

    /// Account balance in USD.
    pub fn balance(&self) -> Result<f64, CoreError> {
        let value = self.execute(&Operation::Balance)?;
        parse_amount(&value, "balance")
    }

    pub fn transaction_info(&self, batch: BatchNumber) -> Result<serde_json::Value, CoreError> {
        self.execute(&Operation::TransactionInfo { batch })
    }

    /// Send `amount` USD worth of bitcoin to `address`.
    pub fn transfer_btc(
        &self,
        address: &str,
        amount: f64,
        memo: &str,
    ) -> Result<BatchNumber, CoreError> {
        let value = self.execute(&Operation::TransferBtc {
            address: address.to_owned(),
            amount,
            memo: memo.to_owned(),
        })?;
        BatchNumber::from_value(&value)
    }

    /// Send `amount` USD worth of litecoin to `address`.
    pub fn transfer_litecoin(
        &self,
        address: &str,
        amount: f64,
        memo: &str,
    ) -> Result<BatchNumber, CoreError> {
        let value = self.execute(&Operation::TransferLtc {
            address: address.to_owned(),
            amount,
            memo: memo.to_owned(),
        })?;
        BatchNumber::from_value(&value)
    }

    pub fn history(&self) -> Result<Vec<serde_json::Value>, CoreError> {
        self.history_from(0)
    }

    /// History records, skipping the newest `skip` entries.
    pub fn history_from(&self, skip: u64) -> Result<Vec<serde_json::Value>, CoreError> {
        match self.execute(&Operation::History { skip })? {
            serde_json::Value::Array(records) => Ok(records),
            serde_json::Value::Null => Ok(Vec::new()),
            other => Err(CoreError::InvalidValue(format!(
                "history must be a list, got {other}"
            ))),
        }
    }
}

fn parse_amount(value: &serde_json::Value, field: &str) -> Result<f64, CoreError> {
    if let Some(n) = value.as_f64() {
        return Ok(n);
    }

    value
        .as_str()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| CoreError::InvalidValue(format!("invalid {field}: {value}")))
}
