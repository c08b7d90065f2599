//! Error types for the imc_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the BMI computation itself.
///
/// These are recoverable: the caller shows a message and no history
/// record is created.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Height is zero, negative or not a number, so BMI is undefined
    #[error("Altura inválida: verifique os valores inseridos. (altura = {height})")]
    InvalidHeight { height: f64 },
}

/// Core error type for imc_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// BMI could not be computed
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A value read back from an export did not match any known label
    #[error("Parse error: {0}")]
    Parse(String),
}
