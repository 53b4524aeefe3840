//! `ordkit`: builds unsigned inscription transactions from the command line.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ordkit_inscriber::InscriberConfig;
use tracing_subscriber::EnvFilter;

mod brc20;
mod content;
mod decode;
mod fee;
mod inscribe;
mod network;

use network::NetworkArg;

#[derive(Debug, Parser)]
#[command(name = "ordkit", version, about = "Ordinal inscription and BRC-20 transaction builder")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Network, overriding the config file
    #[arg(long, short, global = true, value_enum)]
    network: Option<NetworkArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build an unsigned inscription transaction for a file or text
    Inscribe(inscribe::InscribeArgs),

    /// Build an unsigned BRC-20 operation inscription
    #[command(subcommand)]
    Brc20(brc20::Brc20Command),

    /// Decode an envelope script from hex
    Decode(decode::DecodeArgs),

    /// Estimate the fee for inscribing some content
    EstimateFee(fee::EstimateFeeArgs),
}

fn load_config(cli: &Cli) -> Result<InscriberConfig> {
    let mut config = match &cli.config {
        Some(path) => InscriberConfig::load(path)?,
        None => InscriberConfig::default(),
    };
    if let Some(network) = cli.network {
        config.network = network.into();
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Command::Inscribe(args) => inscribe::handle_inscribe(args, config),
        Command::Brc20(cmd) => brc20::handle_command(cmd, config),
        Command::Decode(args) => decode::handle_decode(args),
        Command::EstimateFee(args) => fee::handle_estimate(args, &config),
    }
}
