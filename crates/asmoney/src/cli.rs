use std::path::PathBuf;

use asmoney_core::ConfigSource;
use clap::{Parser, Subcommand};

/// asmoney — query balances and send transfers through the ASMoney API.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// JSON file with default settings (endpoint, username, api_name, ...).
    #[arg(long, env = "ASMONEY_CONFIG")]
    pub config: Option<PathBuf>,

    /// API endpoint URL.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Account username.
    #[arg(long)]
    pub username: Option<String>,

    /// API name configured for the account.
    #[arg(long)]
    pub api_name: Option<String>,

    /// API password configured for the account.
    #[arg(long)]
    pub api_password: Option<String>,

    /// Request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Connect timeout in seconds.
    #[arg(long)]
    pub connect_timeout_secs: Option<u64>,

    /// Print the raw request/response transcript to stderr.
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the USD balance.
    Balance,

    /// Show one transaction by batch number.
    Transaction { batch: u64 },

    /// Send bitcoin worth `amount` USD.
    TransferBtc {
        address: String,
        amount: f64,
        #[arg(default_value = "")]
        memo: String,
    },

    /// Send litecoin worth `amount` USD.
    TransferLtc {
        address: String,
        amount: f64,
        #[arg(default_value = "")]
        memo: String,
    },

    /// List history records.
    History {
        /// Number of newest records to skip.
        #[arg(long, default_value = "0")]
        skip: u64,
    },
}

impl Cli {
    /// Flags as the top override layer, above `ASMONEY_*` variables and the
    /// config file.
    pub fn overrides(&self) -> ConfigSource {
        ConfigSource {
            endpoint: self.endpoint.clone(),
            username: self.username.clone(),
            api_name: self.api_name.clone(),
            api_password: self.api_password.clone(),
            timeout_secs: self.timeout_secs,
            connect_timeout_secs: self.connect_timeout_secs,
        }
    }
}
