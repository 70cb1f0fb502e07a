//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Install and authenticate the RapidFort CLI inside a build workspace.
#[derive(Parser, Debug)]
#[command(name = "rfinstall")]
#[command(about = "Install the RapidFort CLI into a build workspace")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file
    #[arg(long, global = true, env = "RFINSTALL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
