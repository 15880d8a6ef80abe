use secrecy::ExposeSecret;
use secrecy::SecretString;

use super::errors::JwtError;

/// Symmetric signing secret for access tokens.
///
/// Loaded once at startup. The raw value is only exposed to the signing keys
/// and is redacted from `Debug` output.
#[derive(Debug)]
pub struct TokenSecret(SecretString);

impl TokenSecret {
    /// Minimum secret length in bytes (256 bits for HS256).
    pub const MIN_LENGTH: usize = 32;

    /// Wrap a secret, enforcing the minimum length.
    ///
    /// # Errors
    /// * `SecretTooShort` - Secret is shorter than 32 bytes
    pub fn new(secret: impl Into<String>) -> Result<Self, JwtError> {
        let secret: String = secret.into();
        if secret.len() < Self::MIN_LENGTH {
            return Err(JwtError::SecretTooShort {
                min: Self::MIN_LENGTH,
                actual: secret.len(),
            });
        }
        Ok(Self(SecretString::from(secret)))
    }

    /// Length of the secret in bytes.
    pub fn byte_len(&self) -> usize {
        self.0.expose_secret().len()
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.expose_secret().as_bytes()
    }
}
