use thiserror::Error;

/// Domain errors from the credential subsystem.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// A credential record already exists for this username
    /// (case-insensitive).
    #[error("username is already taken")]
    DuplicateUsername,

    /// A required registration field was empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// No credential record carries the given id.
    #[error("user not found")]
    UserNotFound,

    /// The supplied current password does not match the stored digest.
    #[error("wrong password")]
    WrongPassword,
}

/// Result alias for credential operations.
pub type AuthResult<T> = Result<T, AuthError>;
