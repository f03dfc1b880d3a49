use thiserror::Error;

/// Errors from parsing foundation types out of external text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// The string is not a valid record identifier.
    #[error("invalid record id: {0}")]
    InvalidRecordId(String),

    /// The string names no known order status.
    #[error("unknown order status: {0}")]
    UnknownStatus(String),
}
