use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as _;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Storage formats `verify` understands, told apart by prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scheme {
    /// `$2a$`, `$2b$`, `$2x$` or `$2y$` modular-crypt bcrypt.
    Bcrypt,
    /// Anything else is parsed as a PHC string (Argon2).
    Phc,
}

impl Scheme {
    fn of(hash: &str) -> Self {
        match hash.as_bytes() {
            [b'$', b'2', b'a' | b'b' | b'x' | b'y', b'$', ..] => Scheme::Bcrypt,
            _ => Scheme::Phc,
        }
    }
}

/// Argon2id hashing, with verification of both Argon2 and legacy bcrypt hashes.
///
/// Accounts registered before the switch to Argon2 keep their bcrypt hash
/// until the password is next changed.
#[derive(Debug, Default, Clone, Copy)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash `password` into an Argon2id PHC string with a fresh random salt.
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejected the input or parameters
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|phc| phc.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check `password` against a stored hash.
    ///
    /// `Ok(false)` is a clean mismatch. Both backends compare in constant time.
    ///
    /// # Errors
    /// * `VerificationFailed` - stored hash is malformed or uses an unknown algorithm
    pub fn verify(&self, password: &str, stored: &str) -> Result<bool, PasswordError> {
        match Scheme::of(stored) {
            Scheme::Bcrypt => bcrypt::verify(password, stored)
                .map_err(|e| PasswordError::VerificationFailed(format!("bcrypt: {}", e))),
            Scheme::Phc => {
                let phc = PasswordHash::new(stored)
                    .map_err(|e| PasswordError::VerificationFailed(format!("phc: {}", e)))?;

                match Argon2::default().verify_password(password.as_bytes(), &phc) {
                    Ok(()) => Ok(true),
                    Err(argon2::password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argon2_hash_verifies_only_its_password() {
        let hasher = PasswordHasher::new();
        let stored = hasher.hash("pass_word!").unwrap();

        assert!(stored.starts_with("$argon2id$"));
        assert_eq!(hasher.verify("pass_word!", &stored), Ok(true));
        assert_eq!(hasher.verify("pass_word?", &stored), Ok(false));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = PasswordHasher::new();

        assert_ne!(hasher.hash("yahoo").unwrap(), hasher.hash("yahoo").unwrap());
    }

    #[test]
    fn test_legacy_bcrypt_hash() {
        let hasher = PasswordHasher::new();
        let stored = bcrypt::hash("yahoo", 4).unwrap();

        assert_eq!(Scheme::of(&stored), Scheme::Bcrypt);
        assert_eq!(hasher.verify("yahoo", &stored), Ok(true));
        assert_eq!(hasher.verify("google", &stored), Ok(false));
    }

    #[test]
    fn test_unreadable_hashes_are_faults_not_mismatches() {
        let hasher = PasswordHasher::new();

        for stored in ["invalid_hash", "$2b$04$tooshort", ""] {
            assert!(
                matches!(
                    hasher.verify("password", stored),
                    Err(PasswordError::VerificationFailed(_))
                ),
                "{stored:?} should be a verifier fault"
            );
        }
    }
}
