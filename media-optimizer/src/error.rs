/// Error types for the media optimizer
///
/// Every failure surfaced by the engine is an `AppError`. The type is `Clone`
/// so that all callers coalesced onto one computation receive the same
/// failure.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for media-optimizer operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "error_type", content = "details")]
pub enum AppError {
    /// Options rejected before any work began
    #[error("Validation error: {0}")]
    Validation(String),

    /// Manifest construction failed
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Internal engine error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Manifest(_) => "manifest_error",
            Self::Internal(_) => "internal_error",
        }
    }
}
