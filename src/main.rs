//! PatternKit CLI - incremental builds for pattern libraries
//!
//! Usage: patternkit <COMMAND>
//!
//! Commands:
//!   watch   Watch the patterns tree and rebuild on change
//!   build   Gather, render and write every pattern once
//!   list    Print the navigation tree

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let context = commands::load_context(cli.config.as_deref(), cli.verbose)?;

    match cli.command {
        Commands::Watch {
            interval_ms,
            max_passes,
        } => commands::watch::cmd_watch(&context, interval_ms, max_passes, cli.json),
        Commands::Build => commands::build::cmd_build(&context, cli.json),
        Commands::List => commands::list::cmd_list(&context, cli.json),
    }
}
