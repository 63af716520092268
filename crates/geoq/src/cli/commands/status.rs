//! Implementation of `geoq status`.

use std::process::ExitCode;

use geoq_config::discover_config_files;

use crate::cli::context::CommandContext;

/// Shows configuration, warnings, and backend reachability.
pub async fn run(ctx: &mut CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);

    println!("Configuration");
    println!();

    if config_files.is_empty() {
        println!("No configuration files found.");
        println!();
        println!("Run 'geoq init' to create a configuration file.");
    } else {
        println!("Config files (highest precedence first):");
        for path in &config_files {
            println!("  {}", path.display());
        }
        println!();
    }

    println!("Effective settings:");
    println!("  title:    {}", ctx.config.title.as_deref().unwrap_or("(none)"));
    println!("  url:      {}", ctx.config.url.as_deref().unwrap_or("(none)"));
    println!(
        "  auth:     {}",
        match &ctx.config.auth {
            Some(auth) => auth.username.as_str(),
            None => "(none)",
        }
    );
    println!("  timeout:  {}s", ctx.config.timeout_secs);
    println!("  retries:  {}", ctx.config.retries);
    println!("  position: {}", ctx.config.panel.position);
    println!(
        "  index:    {}",
        ctx.config.panel.default_index.as_deref().unwrap_or("(none)")
    );
    println!();

    let warnings = ctx.config.validate();
    if !warnings.is_empty() {
        println!("Warnings ({}):", warnings.len());
        for warning in &warnings {
            println!("  - {warning}");
        }
        println!();
    }

    // Reachability check: the cheapest catalog call.
    if ctx.config.url.is_some() {
        let client = match ctx.client() {
            Ok(client) => client,
            Err(code) => return code,
        };
        match client.list_indices().await {
            Ok(indices) => {
                println!("Backend: reachable, {} searchable index(es)", indices.len());
            }
            Err(e) => {
                println!("Backend: unreachable ({e})");
                return ExitCode::FAILURE;
            }
        }
    }

    if warnings.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
