use std::process::ExitCode;

use clap::Parser;
use fieldarity::cli::Cli;
use fieldarity::commands::{self, Context};
use fieldarity::config::Config;
use fieldarity::logging::init_tracing;

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = Context::from_config(&config, cli.format)?;

    let outcome = commands::run(&cli.command, &ctx)?;
    println!("{}", outcome.output);

    if outcome.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
