use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::IdentityClaim;
use super::errors::JwtError;
use super::secret::TokenSecret;

/// JWT token handler for issuing and verifying access tokens.
///
/// Uses HS256 (HMAC with SHA-256). Keys are derived once from the
/// process-wide `TokenSecret`; the handler is immutable afterwards and safe to
/// share across requests.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler from a validated secret.
    pub fn new(secret: &TokenSecret) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token for `identity` valid for `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, identity: &IdentityClaim, ttl: Duration) -> Result<String, JwtError> {
        self.issue_at(identity, ttl, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`.
    pub fn issue_at(
        &self,
        identity: &IdentityClaim,
        ttl: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::for_identity(identity, issued_at, ttl);

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidKeyFormat | ErrorKind::InvalidAlgorithm => {
                    JwtError::Misconfigured(e.to_string())
                }
                _ => JwtError::EncodingFailed(e.to_string()),
            }
        })
    }

    /// Verify a token and return the identity it carries.
    ///
    /// Signature and expiry are checked with zero leeway; `exp` is required.
    ///
    /// # Errors
    /// * `Expired` - Token lifetime is over
    /// * `InvalidSignature` - Token was not signed with our secret
    /// * `Malformed` - Token cannot be decoded or lacks required claims
    /// * `Misconfigured` - Key material is unusable
    pub fn verify(&self, token: &str) -> Result<IdentityClaim, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims.into())
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidKeyFormat
                | ErrorKind::InvalidEcdsaKey
                | ErrorKind::InvalidRsaKey(_) => JwtError::Misconfigured(e.to_string()),
                _ => JwtError::Malformed(e.to_string()),
            })
    }
}
