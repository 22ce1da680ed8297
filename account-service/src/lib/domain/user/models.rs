use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// Profile picture assigned to every account created without one.
pub const DEFAULT_PROFILE_PIC: &str =
    "https://cdn1.iconfinder.com/data/icons/ios-edge-line-12/25/User-Square-512.png";

/// User aggregate entity.
///
/// Carries the password hash, so it must never be serialized outward;
/// inbound adapters map it to response types that omit the hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub profile_pic: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Public projection used in follower and following lists.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            profile_pic: self.profile_pic.clone(),
        }
    }
}

/// Account identifier, a random v4 UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `Malformed` - not a UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        s.parse::<Uuid>()
            .map(Self)
            .map_err(|e| UserIdError::Malformed(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account handle, normalized to trimmed lowercase.
///
/// Normalizing on construction makes every comparison, lookup and unique
/// constraint case-insensitive. Allowed: 3 to 32 letters, digits, `_`, `-`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const LENGTH: std::ops::RangeInclusive<usize> = 3..=32;

    pub fn new(raw: String) -> Result<Self, UsernameError> {
        let normalized = raw.trim().to_lowercase();

        let length = normalized.chars().count();
        if !Self::LENGTH.contains(&length) {
            return Err(UsernameError::Length {
                min: *Self::LENGTH.start(),
                max: *Self::LENGTH.end(),
                actual: length,
            });
        }

        match normalized
            .chars()
            .find(|c| !(c.is_alphanumeric() || matches!(c, '_' | '-')))
        {
            Some(c) => Err(UsernameError::ForbiddenCharacter(c)),
            None => Ok(Self(normalized)),
        }
    }

    /// Wrap a username read back from the store as-is.
    ///
    /// Rows written under older rules stay readable.
    pub(crate) fn from_stored(stored: String) -> Self {
        Self(stored)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contact address, normalized to trimmed lowercase and checked by the
/// `email_address` parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(raw: String) -> Result<Self, EmailError> {
        let normalized = raw.trim().to_lowercase();
        match email_address::EmailAddress::from_str(&normalized) {
            Ok(_) => Ok(Self(normalized)),
            Err(e) => Err(EmailError::Unparseable(e.to_string())),
        }
    }

    pub(crate) fn from_stored(stored: String) -> Self {
        Self(stored)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plaintext password on its way to the hasher.
///
/// `Debug` is redacted so the value cannot end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// # Errors
    /// * `Empty` - Password is empty
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

/// Song owned by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub id: Uuid,
    pub owner_id: UserId,
    pub title: String,
    pub artist: String,
    pub created_at: DateTime<Utc>,
}

/// Public projection of a user, as listed among followers and following.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub username: Username,
    pub profile_pic: String,
}

/// User enriched with its relationship sets.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user: User,
    pub songs: Vec<Song>,
    pub followers: Vec<UserSummary>,
    pub following: Vec<UserSummary>,
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
    pub profile_pic: Option<String>,
}

impl CreateUserCommand {
    /// Construct a new create user command.
    ///
    /// The password is hashed by the service; `profile_pic` falls back to
    /// `DEFAULT_PROFILE_PIC`.
    pub fn new(
        username: Username,
        email: EmailAddress,
        password: Password,
        profile_pic: Option<String>,
    ) -> Self {
        Self {
            username,
            email,
            password,
            profile_pic,
        }
    }
}

/// Command to update an existing user with optional validated fields.
///
/// All fields are optional to support partial updates.
/// Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub username: Option<Username>,
    pub email: Option<EmailAddress>,
    pub password: Option<Password>,
    pub profile_pic: Option<String>,
}

/// Credentials supplied on login. Never persisted.
#[derive(Debug)]
pub struct LoginCommand {
    pub username: String,
    pub password: Password,
}

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub user: User,
    pub token: String,
    pub issued_at: i64,
    pub expires_at: i64,
}
