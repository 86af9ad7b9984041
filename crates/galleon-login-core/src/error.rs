//! Error types for the login core
//!
//! Small taxonomy split along the failure-handling boundaries of the spec:
//! degradable reads are handled locally and never surface here, so the
//! variants cover the failures that DO propagate.

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Login core errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Store used before `init()` completed (programming-contract error)
    #[error("Duress settings store not initialized: call init() first")]
    NotInitialized,

    /// Underlying persistence failure (file or key-value store)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error (bad store id, key, or value)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Account capability failure (e.g. enabling OTP rejected)
    #[error("Account error: {0}")]
    Account(String),
}
