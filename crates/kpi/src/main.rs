//! `kpi` -- financial KPI formula engine CLI.
//!
//! Parses arguments with clap, resolves the runtime context (project
//! directory and configuration), and dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

fn main() {
    let cli = Cli::parse();
    let json = cli.global.json;

    if let Err(e) = run(cli) {
        if json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let ctx = RuntimeContext::from_global_args(&cli.global)?;

    if ctx.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(ctx.config.log_filter.as_str())
            .with_writer(std::io::stderr)
            .init();
        tracing::debug!(kpi_dir = ?ctx.kpi_dir, "runtime context ready");
    }

    match cli.command {
        Some(Commands::List(args)) => commands::list::run(&ctx, &args),
        Some(Commands::Show(args)) => commands::show::run(&ctx, &args),
        Some(Commands::Eval(args)) => commands::eval::run(&ctx, &args),
        Some(Commands::Calc(args)) => commands::calc::run(&ctx, &args),
        Some(Commands::Check(args)) => commands::check::run(&ctx, &args),
        Some(Commands::Vars(args)) => commands::vars::run(&ctx, &args),
        Some(Commands::Completion(args)) => commands::completion::run(&ctx, &args),
        None => {
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    }
}
