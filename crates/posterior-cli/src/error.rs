//! Error types for the posterior CLI

use posterior_grid::config::ConfigError;
use posterior_grid::PosteriorError;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// Out-of-domain input
    #[error("{0}")]
    InvalidArgument(String),

    /// Normalization failed
    #[error("{0}")]
    NumericDegeneracy(String),

    /// Config file could not be read or validated
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidArgument(_) => 2,
            Self::NumericDegeneracy(_) => 3,
            Self::Config(_) | Self::Io(_) | Self::Json(_) => 4,
        }
    }
}

impl From<PosteriorError> for CliError {
    fn from(e: PosteriorError) -> Self {
        match e {
            PosteriorError::InvalidArgument { .. } => Self::InvalidArgument(e.to_string()),
            PosteriorError::NumericDegeneracy { .. } => Self::NumericDegeneracy(e.to_string()),
        }
    }
}
