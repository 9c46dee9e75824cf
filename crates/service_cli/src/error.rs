//! Error types for the slice CLI.

use slice_risk::RiskError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Input data is malformed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Command line argument is invalid
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Report computation failed
    #[error("Risk engine error: {0}")]
    Risk(#[from] RiskError),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV decoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::invalid_input("missing weights");
        assert_eq!(err.to_string(), "Invalid input: missing weights");

        let err = CliError::from(RiskError::UnknownWeightAsset("XLE".into()));
        assert!(err.to_string().contains("XLE"));
    }
}
