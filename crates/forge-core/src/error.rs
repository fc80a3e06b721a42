//! Error types surfaced by the platform core.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlatformError>;

#[derive(Debug, Error, Diagnostic)]
pub enum PlatformError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] forge_config::ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Cache(#[from] forge_cache::CacheError),

    #[error("no node matches target '{target}'")]
    #[diagnostic(
        code(forge::core::target_not_found),
        help("Declare a [node] table for this path, or a node mask matching it")
    )]
    TargetNotFound { target: String },

    #[error("failed to initialize node '{node}': {message}")]
    #[diagnostic(code(forge::core::node_init_failed))]
    NodeInitError { node: String, message: String },

    #[error("build failed for node '{node}': {message}")]
    #[diagnostic(code(forge::core::node_build_failed))]
    NodeBuildError { node: String, message: String },

    #[error("clean failed for node '{node}': {message}")]
    #[diagnostic(code(forge::core::node_clean_failed))]
    NodeCleanError { node: String, message: String },

    #[error("unknown task '{name}'")]
    #[diagnostic(code(forge::core::unknown_task))]
    UnknownTask { name: String },

    #[error("task '{name}' failed: {message}")]
    #[diagnostic(code(forge::core::task_failed))]
    TaskFailed { name: String, message: String },

    #[error("cache is not loaded for this operation")]
    #[diagnostic(code(forge::core::cache_not_loaded))]
    CacheNotLoaded,

    #[error("I/O error at {}: {source}", path.display())]
    #[diagnostic(code(forge::core::io_error))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
