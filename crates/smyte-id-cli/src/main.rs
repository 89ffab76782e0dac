#![doc = include_str!("../README.md")]

mod command;
mod config;
mod telemetry;

use clap::Parser;
use config::{CliArgs, CliConfig};
use telemetry::init_telemetry;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = CliConfig::try_from(args)?;

    init_telemetry(config.log_format)?;
    tracing::debug!(?config, "starting");

    let output = command::run(&config)?;
    println!("{output}");
    Ok(())
}
