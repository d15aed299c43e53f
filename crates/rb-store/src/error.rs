//! Error types for history and preset storage.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the underlying stores.
///
/// The history adapter and preset store log these and degrade; they never
/// hand them to callers.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing files failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be encoded or decoded.
    #[error("malformed data: {0}")]
    Serde(#[from] serde_json::Error),

    /// The store was used before `init` succeeded.
    #[error("store not initialized")]
    NotInitialized,

    /// The store refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A key contained characters the store cannot hold.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}
