//! Error types for the repository layer

use thiserror::Error;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors that can occur during repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database error (when database feature is enabled)
    #[cfg(feature = "postgres")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be mapped back to a chapter
    #[error("Corrupt record {id}: {reason}")]
    CorruptRecord { id: String, reason: String },

    /// Store rejected a write
    #[error("Write rejected: {0}")]
    WriteRejected(String),

    /// Generic error
    #[error("Repository error: {0}")]
    Other(String),
}
