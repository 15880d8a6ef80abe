use std::time::Duration;

use crate::jwt::IdentityClaim;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenSecret;
use crate::password::HashCost;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Plaintext behind the decoy hash. Its verification result is never used.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Stand-in decoy with the default cost, used only if hashing fails at construction.
const FALLBACK_DECOY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Authentication coordinator combining password verification and JWT generation.
///
/// Built once at startup from the signing secret, hashing cost and token
/// lifetime; immutable afterwards.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
    decoy_hash: String,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Secret key for JWT signing
    /// * `cost` - Work factor for new password hashes
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(secret: TokenSecret, cost: HashCost, token_ttl: Duration) -> Self {
        let password_hasher = PasswordHasher::new(cost);
        let decoy_hash = password_hasher
            .hash(DECOY_PASSWORD)
            .unwrap_or_else(|_| FALLBACK_DECOY_HASH.to_string());

        Self {
            password_hasher,
            jwt_handler: JwtHandler::new(&secret),
            token_ttl,
            decoy_hash,
        }
    }

    /// Lifetime of issued tokens.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Hash a password for storage.
    ///
    /// CPU bound; async callers should run it on a blocking thread.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Run a full password verification for an account that does not exist.
    ///
    /// The decoy hash carries the configured cost, so this costs the same as
    /// `verify_password` on a real account. CPU bound like `hash_password`.
    pub fn verify_unknown_account(&self, password: &str) {
        let _ = self.password_hasher.verify(password, &self.decoy_hash);
    }

    /// Verify credentials and generate JWT token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `identity` - Principal to encode in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        identity: &IdentityClaim,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(identity)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Generate JWT token without password verification.
    ///
    /// Used right after registration, where the password was just hashed.
    pub fn issue_token(&self, identity: &IdentityClaim) -> Result<String, JwtError> {
        self.jwt_handler.issue(identity, self.token_ttl)
    }

    /// Validate and decode JWT token.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<IdentityClaim, JwtError> {
        self.jwt_handler.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator(secret: &str) -> Authenticator {
        Authenticator::new(
            TokenSecret::new(secret).unwrap(),
            HashCost::new(1, 8 * 1024, 1).unwrap(),
            Duration::from_secs(24 * 60 * 60),
        )
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator("test_secret_key_at_least_32_bytes!");

        let password = "Abc12345!";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let identity = IdentityClaim::new(1, "a@b.com");
        let result = authenticator
            .authenticate(password, &hash, &identity)
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());

        let decoded = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded, identity);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator("test_secret_key_at_least_32_bytes!");

        let hash = authenticator
            .hash_password("Abc12345!")
            .expect("Failed to hash password");

        let identity = IdentityClaim::new(1, "a@b.com");
        let result = authenticator.authenticate("wrong_password", &hash, &identity);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_corrupt_hash() {
        let authenticator = authenticator("test_secret_key_at_least_32_bytes!");

        let identity = IdentityClaim::new(1, "a@b.com");
        let result = authenticator.authenticate("Abc12345!", "not-a-phc-string", &identity);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_decoy_hash_uses_configured_cost() {
        let authenticator = authenticator("test_secret_key_at_least_32_bytes!");

        assert!(authenticator.decoy_hash.starts_with("$argon2id$"));
        assert!(authenticator.decoy_hash.contains("m=8192,t=1,p=1"));
    }

    #[test]
    fn test_fallback_decoy_hash_is_verifiable() {
        let hasher = PasswordHasher::default();

        // Parses as PHC, so verification does the full work and fails
        assert!(argon2::password_hash::PasswordHash::new(FALLBACK_DECOY_HASH).is_ok());
        assert!(!hasher.verify(DECOY_PASSWORD, FALLBACK_DECOY_HASH));
    }

    #[test]
    fn test_issue_and_validate_token() {
        let authenticator = authenticator("test_secret_key_at_least_32_bytes!");
        let identity = IdentityClaim::new(9, "c@d.com");

        let token = authenticator
            .issue_token(&identity)
            .expect("Failed to issue token");

        let decoded = authenticator
            .validate_token(&token)
            .expect("Failed to validate token");
        assert_eq!(decoded, identity);
    }

    #[test]
    fn test_validate_token_from_other_secret() {
        let issuer = authenticator("issuer_secret_key_at_least_32_bytes!");
        let verifier = authenticator("verifier_secret_key_at_least_32_byte");

        let token = issuer
            .issue_token(&IdentityClaim::new(1, "a@b.com"))
            .unwrap();

        assert_eq!(
            verifier.validate_token(&token),
            Err(JwtError::InvalidSignature)
        );
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = authenticator("test_secret_key_at_least_32_bytes!");

        let result = authenticator.validate_token("invalid.token.here");
        assert!(result.unwrap_err().is_rejection());
    }
}
