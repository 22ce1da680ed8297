use chrono::DateTime;
use chrono::Utc;

use crate::guard::token_from_header;
use crate::guard::AuthOutcome;
use crate::guard::AuthRejection;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SigningKey;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT handling.
///
/// Owns the signing key for both issuing and verifying, so a token can only
/// be accepted by the deployment that minted it.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    application: String,
    decoy_hash: Option<String>,
}

/// A freshly signed access token with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// JWT access token
    pub access_token: String,
    pub claims: Claims,
}

/// Why a login could not produce a token.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("password does not match")]
    InvalidCredentials,

    #[error(transparent)]
    PasswordError(#[from] PasswordError),

    #[error(transparent)]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `signing_key` - Secret key for JWT signing and verification
    /// * `application` - Application identifier written to `iss` and `aud`
    pub fn new(signing_key: &SigningKey, application: impl Into<String>) -> Self {
        let application = application.into();
        let password_hasher = PasswordHasher::new();
        let decoy_hash = match password_hasher.hash("decoy-password") {
            Ok(hash) => Some(hash),
            Err(e) => {
                tracing::warn!(error = %e, "Could not prepare decoy hash");
                None
            }
        };

        Self {
            password_hasher,
            jwt_handler: JwtHandler::new(signing_key, &application),
            application,
            decoy_hash,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Spend the same effort as a real verification, discarding the result.
    ///
    /// Called when no account matches, so response time does not reveal
    /// whether a username exists. The decoy is an Argon2id hash prepared at
    /// construction; accounts still on a legacy bcrypt hash verify at bcrypt's
    /// cost instead, which this does not mask.
    pub fn verify_decoy(&self, password: &str) {
        if let Some(hash) = &self.decoy_hash {
            let _ = self.password_hasher.verify(password, hash);
        }
    }

    /// Verify credentials and issue a token for `identity`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `identity` - Subject identity to embed in the token
    /// * `now` - Issue time
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be checked
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        identity: impl ToString,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(identity, now)?)
    }

    /// Issue a token for `identity` without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(
        &self,
        identity: impl ToString,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        let claims = Claims::issued_at(identity, &self.application, now);
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(IssuedToken {
            access_token,
            claims,
        })
    }

    /// Check a presented `Authorization` header value at time `now`.
    ///
    /// Expiry is judged against `now` alone, once the signature and claims
    /// have been verified. The system clock plays no part.
    pub fn authenticate_token(&self, header: Option<&str>, now: DateTime<Utc>) -> AuthOutcome {
        let Some(token) = token_from_header(header) else {
            return AuthOutcome::Rejected(AuthRejection::MissingToken);
        };

        let claims = match self.jwt_handler.decode(token) {
            Ok(claims) => claims,
            Err(JwtError::InvalidToken(reason)) => {
                tracing::debug!(reason = %reason, "Rejected token");
                return AuthOutcome::Rejected(AuthRejection::InvalidToken);
            }
            Err(e) => {
                tracing::error!(error = %e, "Token verification failed");
                return AuthOutcome::Rejected(AuthRejection::VerificationFailure);
            }
        };

        if claims.is_expired(now.timestamp()) {
            return AuthOutcome::Rejected(AuthRejection::ExpiredToken);
        }

        AuthOutcome::Authenticated(claims)
    }
}
