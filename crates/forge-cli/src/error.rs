//! CLI-level error wrapping, with `miette` diagnostics for terminal output.

use forge_core::PlatformError;
use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Platform(#[from] PlatformError),

    #[error("invalid argument: {message}")]
    #[diagnostic(code(forge::cli::invalid_argument))]
    InvalidArgument { message: String },
}

/// Convert a `CliError` into a boxed `miette` report for top-level
/// reporting from `main`.
pub fn cli_error_to_miette(err: CliError) -> miette::Report {
    miette::Report::new(err)
}
