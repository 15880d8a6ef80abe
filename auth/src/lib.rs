//! Authentication utilities library
//!
//! Provides the credential and token primitives for the account service:
//! - Password hashing (Argon2id) with a configurable work factor
//! - JWT access token issuance and verification (HS256)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{HashCost, PasswordHasher};
//!
//! let hasher = PasswordHasher::new(HashCost::default());
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use std::time::Duration;
//! use auth::{IdentityClaim, JwtHandler, TokenSecret};
//!
//! let secret = TokenSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let handler = JwtHandler::new(&secret);
//! let identity = IdentityClaim::new(1, "a@b.com");
//! let token = handler.issue(&identity, Duration::from_secs(3600)).unwrap();
//! assert_eq!(handler.verify(&token).unwrap(), identity);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use std::time::Duration;
//! use auth::{Authenticator, HashCost, IdentityClaim, TokenSecret};
//!
//! let auth = Authenticator::new(
//!     TokenSecret::new("secret_key_at_least_32_bytes_long!").unwrap(),
//!     HashCost::default(),
//!     Duration::from_secs(24 * 60 * 60),
//! );
//!
//! // Register: hash password
//! let hash = auth.hash_password("Abc12345!").unwrap();
//!
//! // Login: verify and generate token
//! let identity = IdentityClaim::new(1, "a@b.com");
//! let result = auth.authenticate("Abc12345!", &hash, &identity).unwrap();
//!
//! // Validate token
//! let decoded = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded, identity);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::IdentityClaim;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenSecret;
pub use password::HashCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
