//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure:
//! - Password hashing (Argon2id) and verification (Argon2id and legacy bcrypt)
//! - JWT token issuance and validation
//! - Bearer token guard producing a typed `AuthOutcome`
//!
//! The signing key is passed in explicitly as a `SigningKey`; nothing in this
//! crate reads the environment.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{AuthOutcome, Authenticator, SigningKey};
//! use chrono::Utc;
//!
//! let key = SigningKey::from_secret("secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(&key, "thatSong");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let issued = auth.authenticate("password123", &hash, "user123", Utc::now()).unwrap();
//!
//! // Guard: check the token presented on a later request
//! let outcome = auth.authenticate_token(Some(&issued.access_token), Utc::now());
//! assert!(matches!(outcome, AuthOutcome::Authenticated(claims) if claims.identity == "user123"));
//! ```

pub mod authenticator;
pub mod guard;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::IssuedToken;
pub use guard::AuthOutcome;
pub use guard::AuthRejection;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::SigningKey;
pub use jwt::TOKEN_LIFETIME_SECONDS;
pub use password::PasswordError;
pub use password::PasswordHasher;
