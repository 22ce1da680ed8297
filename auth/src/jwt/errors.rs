use thiserror::Error;

/// Failures of signing or decoding a token.
///
/// `InvalidToken` describes the presented token;
/// `VerificationFailed` is a fault on this side (key or crypto backend).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("signing key is missing or empty")]
    MissingSigningKey,

    #[error("token signing failed: {0}")]
    EncodingFailed(String),

    #[error("token rejected: {0}")]
    InvalidToken(String),

    #[error("token could not be verified: {0}")]
    VerificationFailed(String),
}
