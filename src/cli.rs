use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// PatternKit - incremental builds for pattern libraries
#[derive(Parser, Debug)]
#[command(name = "patternkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to ./patternkit.toml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as NDJSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the patterns tree and rebuild on change
    Watch {
        /// Minimum delay between scan passes, in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Stop after this many scan passes
        #[arg(long)]
        max_passes: Option<usize>,
    },

    /// Gather, render and write every pattern once
    Build,

    /// Print the navigation tree
    List,
}
