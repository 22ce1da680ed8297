use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Lifetime of every issued token in seconds (28 days).
pub const TOKEN_LIFETIME_SECONDS: i64 = 2_419_200;

/// Claim set carried by an access token.
///
/// Issuer and audience are both the application identifier; `identity` is
/// the durable identifier of the authenticated account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// Subject identity (user identifier)
    pub identity: String,
}

impl Claims {
    /// Build the claims for a token issued at `now`.
    ///
    /// # Arguments
    /// * `identity` - Durable identifier of the subject
    /// * `application` - Application identifier used as issuer and audience
    /// * `now` - Issue time
    ///
    /// # Returns
    /// Claims expiring `TOKEN_LIFETIME_SECONDS` after `now`
    pub fn issued_at(identity: impl ToString, application: &str, now: DateTime<Utc>) -> Self {
        let expiration = now + Duration::seconds(TOKEN_LIFETIME_SECONDS);

        Self {
            iss: application.to_string(),
            aud: application.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            identity: identity.to_string(),
        }
    }

    /// Check if token is expired at `current_timestamp` (seconds).
    ///
    /// A token is valid strictly before `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
