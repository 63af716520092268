//! Implementation of `geoq fields`.

use std::process::ExitCode;

use crate::cli::{args::FieldsCommand, context::CommandContext, output};

/// Lists an index's fields and their kinds.
pub async fn run(ctx: &mut CommandContext, cmd: &FieldsCommand) -> ExitCode {
    let client = match ctx.client() {
        Ok(client) => client,
        Err(code) => return code,
    };

    let fields = match client.get_fields(&cmd.index).await {
        Ok(fields) => fields,
        Err(e) => {
            eprintln!("error: failed to read fields of '{}': {e}", cmd.index);
            return ExitCode::FAILURE;
        }
    };

    if cmd.output.json {
        return output::print_json(&fields.fields);
    }

    if fields.fields.is_empty() {
        println!("Index '{}' has no mapped fields.", cmd.index);
        return ExitCode::SUCCESS;
    }

    println!("{}", output::fields_table(&fields));
    ExitCode::SUCCESS
}
