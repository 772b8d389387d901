//! Error types for keytree operations.

use thiserror::Error;

/// Fatal error conditions of the resource core.
///
/// Version mismatches are deliberately absent: they are non-fatal and
/// surface as a logged warning from the version engine, not as an error
/// value.
#[derive(Debug, Error)]
pub enum KeytreeError {
    /// The input document is not valid JSON or does not match the expected
    /// shape (missing `source`, wrong value type, unrecognized keys).
    #[error("malformed input document: {0}")]
    Input(#[from] serde_json::Error),

    /// Materialize was invoked without a target directory argument.
    #[error("materialize requires a target directory argument")]
    MissingTargetDir,

    /// A filesystem operation failed. Files already written stay in place;
    /// there is no rollback.
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for keytree operations.
pub type Result<T> = std::result::Result<T, KeytreeError>;
