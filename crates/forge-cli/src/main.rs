use clap::Parser;

use forge_cli::cli::{Cli, Command};
use forge_cli::{commands, error, logger, ui};

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose, cli.quiet, cli.no_color);
    ui::init_colors();

    let project = cli
        .project
        .clone()
        .unwrap_or_else(|| std::env::current_dir().expect("current directory must be accessible"));

    let result = match cli.command {
        Command::Build { targets } => commands::build::execute(&project, cli.mode, targets).await,
        Command::Clean { targets } => commands::clean::execute(&project, cli.mode, targets).await,
        Command::Task { name, args } => commands::task::execute(&project, cli.mode, name, args).await,
    };

    result.map_err(error::cli_error_to_miette)
}
