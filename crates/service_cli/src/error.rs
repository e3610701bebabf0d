//! CLI error types

use std::path::PathBuf;

use pricer_core::types::{DomainError, PricingError};
use thiserror::Error;

/// Errors surfaced by the `valuer` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// A request file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A request file is not valid TOML for the command.
    #[error("Invalid request file: {0}")]
    Toml(#[from] toml::de::Error),

    /// A result could not be encoded as JSON.
    #[error("Failed to encode results: {0}")]
    Json(#[from] serde_json::Error),

    /// The log filter directive is malformed.
    #[error("Invalid log level: {0}")]
    LogLevel(String),

    /// A request field is well-formed TOML but semantically invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A valuation failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::Pricing(err.into())
    }
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
