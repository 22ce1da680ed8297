use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("not a UUID: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("username must be {min} to {max} characters, got {actual}")]
    Length {
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("username may only contain letters, digits, '_' and '-', found {0:?}")]
    ForbiddenCharacter(char),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("not a valid email address: {0}")]
    Unparseable(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("password must not be empty")]
    Empty,
}

/// Failure reported by a `UserRepository` adapter.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store lookup failed: {0}")]
    LookupFailed(String),

    #[error("store write failed: {0}")]
    WriteFailed(String),
}

/// Every way an account operation can fail.
///
/// Display strings of the non-internal variants are sent to clients as-is.
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error(transparent)]
    InvalidUserId(#[from] UserIdError),

    #[error(transparent)]
    InvalidUsername(#[from] UsernameError),

    #[error(transparent)]
    InvalidEmail(#[from] EmailError),

    #[error(transparent)]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("user not found")]
    NotFound(String),

    #[error("user not found")]
    NotFoundByUsername(String),

    #[error("that username is taken")]
    UsernameAlreadyExists(String),

    #[error("that email is taken")]
    EmailAlreadyExists(String),

    /// Shared by unknown usernames and wrong passwords.
    #[error("username or password is incorrect")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}
