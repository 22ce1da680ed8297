use std::fmt;

use super::errors::JwtError;

/// HMAC secret used to sign and verify tokens.
///
/// Constructed once at startup and injected into the `Authenticator`.
/// The secret never appears in `Debug` output.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Build a signing key from a configured secret.
    ///
    /// # Errors
    /// * `MissingSigningKey` - Secret is empty or whitespace only
    pub fn from_secret(secret: impl AsRef<[u8]>) -> Result<Self, JwtError> {
        let secret = secret.as_ref();
        if secret.iter().all(u8::is_ascii_whitespace) {
            return Err(JwtError::MissingSigningKey);
        }
        Ok(Self(secret.to_vec()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(..)")
    }
}
