//! Command implementations and dispatch.

pub mod fields;
pub mod indices;
pub mod init;
pub mod inspect;
pub mod search;
pub mod status;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub async fn run(command: Commands, ctx: &mut CommandContext) -> ExitCode {
    match command {
        Commands::Indices { output } => indices::run(ctx, &output).await,
        Commands::Fields(cmd) => fields::run(ctx, &cmd).await,
        Commands::Inspect(cmd) => inspect::run(ctx, &cmd).await,
        Commands::Search(cmd) => search::run(ctx, &cmd).await,
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Status => status::run(ctx).await,
    }
}
