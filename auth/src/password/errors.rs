use thiserror::Error;

/// A clean mismatch is not an error: `verify` reports it as `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    HashingFailed(String),

    #[error("stored hash could not be checked: {0}")]
    VerificationFailed(String),
}
