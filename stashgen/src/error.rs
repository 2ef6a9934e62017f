//! Error types for the generator and its collaborators

use error_stack::Report;
use thiserror::Error;

// Error message prefixes
const MSG_FAILED_TO_PREFIX: &str = "Failed to";
const MSG_INVALID_PREFIX: &str = "Invalid";
const MSG_MISSING_PREFIX: &str = "Missing";

/// Result type for the `stashgen` library
pub type Result<T> = std::result::Result<T, Report<Error>>;

/// Failures of the generator itself or of one of its collaborators.
///
/// Problems with the user's marked fields are not errors in this sense, they are reported
/// through [`crate::diagnostics::Diagnostics`] and the round keeps going.
#[derive(Error, Debug)]
pub enum Error {
    /// Generator configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Reading an input or writing an artifact failed
    #[error("File operation failed: {0}")]
    FileOperation(String),

    /// Any other collaborator failure
    #[error("{0}")]
    General(String),

    /// An internal invariant did not hold
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The type manifest is malformed or inconsistent
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// An artifact template could not be rendered
    #[error("Template rendering failed: {0}")]
    Template(String),

    /// Type text could not be parsed
    #[error("Type parse error: {0}")]
    TypeParse(String),
}

impl Error {
    /// Create a "Failed to X" error
    pub fn failed_to(action: &str, details: impl std::fmt::Display) -> Self {
        Self::General(format!("{MSG_FAILED_TO_PREFIX} {action}: {details}"))
    }

    /// Create an "Invalid X" configuration error
    pub fn invalid(what: &str, details: impl std::fmt::Display) -> Self {
        Self::Configuration(format!("{MSG_INVALID_PREFIX} {what}: {details}"))
    }

    /// Create a "Missing X" template error
    pub fn missing_placeholder(name: &str) -> Self {
        Self::Template(format!("{MSG_MISSING_PREFIX} value for placeholder '{name}'"))
    }

    /// Create error for IO operations
    pub fn io_failed(
        operation: &str,
        path: &std::path::Path,
        error: impl std::fmt::Display,
    ) -> Self {
        Self::FileOperation(format!(
            "{MSG_FAILED_TO_PREFIX} {operation} {}: {error}",
            path.display()
        ))
    }
}
