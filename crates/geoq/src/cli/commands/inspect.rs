//! Implementation of `geoq inspect`.

use std::process::ExitCode;

use futures::future::join_all;
use geoq_query::FieldDescriptor;

use crate::{
    cli::{args::InspectCommand, context::CommandContext, output::control_lines},
    panel::build_control,
};

/// Shows the filter control(s) an index's fields would render.
pub async fn run(ctx: &mut CommandContext, cmd: &InspectCommand) -> ExitCode {
    let client = match ctx.client() {
        Ok(client) => client.clone(),
        Err(code) => return code,
    };

    let fields = match client.get_fields(&cmd.index).await {
        Ok(fields) => fields,
        Err(e) => {
            eprintln!("error: failed to read fields of '{}': {e}", cmd.index);
            return ExitCode::FAILURE;
        }
    };

    let selected: Vec<&FieldDescriptor> = match &cmd.field {
        Some(name) => match fields.get(name) {
            Some(field) => vec![field],
            None => {
                eprintln!("error: index '{}' has no field '{name}'", cmd.index);
                return ExitCode::FAILURE;
            }
        },
        None => fields.filterable().collect(),
    };

    if selected.is_empty() {
        println!("Index '{}' has no filterable fields.", cmd.index);
        return ExitCode::SUCCESS;
    }

    // Controls prefetch their stats/options concurrently.
    let controls = join_all(
        selected
            .iter()
            .map(|field| build_control(&client, &cmd.index, field)),
    )
    .await;

    for (field, control) in selected.iter().zip(controls) {
        match control {
            Ok(Some(control)) => {
                for line in control_lines(&control) {
                    println!("{line}");
                }
            }
            Ok(None) => {
                println!("{}: geometry field, not filterable", field.name);
            }
            Err(e) => {
                eprintln!("error: failed to build control for '{}': {e}", field.name);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
