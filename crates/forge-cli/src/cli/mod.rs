//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "forge", version, about = "Build orchestrator core")]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project directory. Defaults to the current directory.
    #[arg(short = 'C', long, global = true)]
    pub project: Option<PathBuf>,

    /// Build mode. Overrides `YENV`, which overrides the `development` default.
    #[arg(short, long, global = true)]
    pub mode: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build targets (or every declared node, if none given).
    Build {
        targets: Vec<String>,
    },
    /// Clean targets (or every declared node, if none given).
    Clean {
        targets: Vec<String>,
    },
    /// Run a named ad-hoc task.
    Task {
        name: String,
        args: Vec<String>,
    },
}
