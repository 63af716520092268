//! Entry point for the `geoq` binary.

use std::{io, process::ExitCode};

use geoq::cli::{CommandContext, args, commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = args::parse_cli();

    // init works even with a broken config file in place.
    let loaded = match &cli.command {
        args::Commands::Init(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    let mut ctx = match loaded {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &mut ctx).await
}
