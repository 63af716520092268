//! Implementation of `geoq indices`.

use std::process::ExitCode;

use crate::cli::{args::OutputArgs, context::CommandContext, output};

/// Lists searchable indices.
pub async fn run(ctx: &mut CommandContext, out: &OutputArgs) -> ExitCode {
    let client = match ctx.client() {
        Ok(client) => client,
        Err(code) => return code,
    };

    let indices = match client.list_indices().await {
        Ok(indices) => indices,
        Err(e) => {
            eprintln!("error: failed to list indices: {e}");
            return ExitCode::FAILURE;
        }
    };

    if out.json {
        return output::print_json(&indices);
    }

    if indices.is_empty() {
        println!("No searchable indices.");
        return ExitCode::SUCCESS;
    }

    println!("{}", output::indices_table(&indices));
    ExitCode::SUCCESS
}
