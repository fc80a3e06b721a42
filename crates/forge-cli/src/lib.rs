//! Build orchestrator CLI.
//!
//! Thin wrapper around `forge-core`'s `MakePlatform`: argument parsing,
//! logging setup, and command dispatch.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
