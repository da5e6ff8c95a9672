mod cli;

use std::sync::Arc;

use asmoney_core::rpc::DebugBuffer;
use asmoney_core::{Asmoney, BatchNumber, ConfigSource, CoreError};
use clap::Parser;
use eyre::WrapErr;
use serde_json::json;

use cli::Command;

fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let file = match &args.config {
        Some(path) => ConfigSource::from_json_file(path).wrap_err("load config file")?,
        None => ConfigSource::default(),
    };
    let env = ConfigSource::from_env().wrap_err("read ASMONEY_* environment")?;
    let config = file
        .merge(env)
        .merge(args.overrides())
        .into_config()
        .wrap_err("resolve configuration")?;
    tracing::debug!(?config, "resolved configuration");

    let transcript = Arc::new(DebugBuffer::new());
    let mut api = Asmoney::new(&config).wrap_err("build API client")?;
    if args.debug {
        api = api.with_observer(transcript.clone());
    }

    let outcome = run(&api, &args.command);

    if args.debug && !transcript.is_empty() {
        eprint!("{}", transcript.transcript());
    }

    let value = outcome.wrap_err_with(|| format!("{} failed", command_name(&args.command)))?;
    println!("{}", serde_json::to_string_pretty(&value)?);

    Ok(())
}

fn run(api: &Asmoney, command: &Command) -> Result<serde_json::Value, CoreError> {
    let value = match command {
        Command::Balance => json!(api.balance()?),
        Command::Transaction { batch } => api.transaction_info(BatchNumber(*batch))?,
        Command::TransferBtc {
            address,
            amount,
            memo,
        } => json!(api.transfer_btc(address, *amount, memo)?),
        Command::TransferLtc {
            address,
            amount,
            memo,
        } => json!(api.transfer_litecoin(address, *amount, memo)?),
        Command::History { skip } => json!(api.history_from(*skip)?),
    };
    Ok(value)
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Balance => "balance",
        Command::Transaction { .. } => "transaction",
        Command::TransferBtc { .. } => "transfer-btc",
        Command::TransferLtc { .. } => "transfer-ltc",
        Command::History { .. } => "history",
    }
}
