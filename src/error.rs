//! Error types for field extraction and coverage reporting

use thiserror::Error;

/// Result type for coverage operations
pub type Result<T> = std::result::Result<T, CoverageError>;

/// Coverage errors
#[derive(Error, Debug)]
pub enum CoverageError {
    /// Extraction was asked to walk something that is not a record.
    /// This is a caller bug, never a data problem.
    #[error("Contract violation: {operation} expects a record type, got {found}")]
    ContractViolation {
        operation: &'static str,
        found: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Fixture not found: {0}")]
    MissingFixture(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),
}

impl CoverageError {
    /// Whether this error signals a programming-contract violation
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, CoverageError::ContractViolation { .. })
    }
}
