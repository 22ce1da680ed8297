use thiserror::Error;

use crate::jwt::Claims;

/// Result of checking a presented bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Signature and expiry checks passed.
    Authenticated(Claims),
    /// The request must not reach the protected handler.
    Rejected(AuthRejection),
}

impl AuthOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthOutcome::Authenticated(_))
    }

    /// Convert into a `Result`, for `?` at the call site.
    pub fn into_result(self) -> Result<Claims, AuthRejection> {
        match self {
            AuthOutcome::Authenticated(claims) => Ok(claims),
            AuthOutcome::Rejected(rejection) => Err(rejection),
        }
    }
}

/// Reason a token was rejected.
///
/// Messages are generic; the underlying cause is only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthRejection {
    #[error("JWT required")]
    MissingToken,

    #[error("JWT expired")]
    ExpiredToken,

    #[error("JWT invalid")]
    InvalidToken,

    #[error("unknown error")]
    VerificationFailure,
}

impl AuthRejection {
    /// HTTP status code for this rejection.
    ///
    /// Caller faults are 401, faults on our side are 500.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthRejection::MissingToken
            | AuthRejection::ExpiredToken
            | AuthRejection::InvalidToken => 401,
            AuthRejection::VerificationFailure => 500,
        }
    }
}

/// Extract the token from an `Authorization` header value.
///
/// The raw token is the canonical form; a `Bearer ` prefix is tolerated.
/// Returns `None` when nothing usable is present.
pub fn token_from_header(header: Option<&str>) -> Option<&str> {
    let value = header?.trim_start();
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .unwrap_or(value)
        .trim();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_from_header() {
        assert_eq!(token_from_header(None), None);
        assert_eq!(token_from_header(Some("")), None);
        assert_eq!(token_from_header(Some("   ")), None);
        assert_eq!(token_from_header(Some("Bearer ")), None);
        assert_eq!(token_from_header(Some("abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(
            token_from_header(Some("Bearer abc.def.ghi")),
            Some("abc.def.ghi")
        );
        assert_eq!(
            token_from_header(Some("bearer abc.def.ghi")),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthRejection::MissingToken.status_code(), 401);
        assert_eq!(AuthRejection::ExpiredToken.status_code(), 401);
        assert_eq!(AuthRejection::InvalidToken.status_code(), 401);
        assert_eq!(AuthRejection::VerificationFailure.status_code(), 500);
    }
}
