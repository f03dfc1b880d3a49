use thiserror::Error;

/// Errors from key-value backend operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key cannot be used by this backend (empty, or contains
    /// characters that do not map to a file name).
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A writer panicked while holding the store lock.
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Result alias for backend operations.
pub type StoreResult<T> = Result<T, StoreError>;
