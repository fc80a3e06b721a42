//! Error types for rule-manifest discovery, loading, and validation.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("no config directory found under {}", root.display())]
    #[diagnostic(
        code(forge::config::dir_not_found),
        help("Create a `.enb` or `.bem` directory with a make manifest at the project root")
    )]
    ConfigDirNotFound { root: PathBuf },

    #[error("no make manifest found in {}", config_dir.display())]
    #[diagnostic(
        code(forge::config::makefile_not_found),
        help("Add a make.toml (or enb-make.toml) file to the config directory")
    )]
    MakefileNotFound { config_dir: PathBuf },

    #[error("invalid rule manifest: {message}")]
    #[diagnostic(code(forge::config::invalid_manifest))]
    InvalidManifest { message: String },

    #[error("invalid configuration value for '{field}'")]
    #[diagnostic(code(forge::config::invalid_value))]
    InvalidValue {
        field: String,
        #[help]
        hint: Option<String>,
    },

    #[error("schema validation failed: {message}")]
    #[diagnostic(code(forge::config::schema_validation))]
    SchemaValidation {
        message: String,
        #[help]
        hint: Option<String>,
    },

    #[error("I/O error: {source}")]
    #[diagnostic(code(forge::config::io_error))]
    Io {
        #[source]
        #[from]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub fn invalid_value(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn schema_validation(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::SchemaValidation {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}
