use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Authenticated principal carried inside an access token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityClaim {
    pub user_id: i64,
    pub email: String,
}

impl IdentityClaim {
    pub fn new(user_id: i64, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }
}

/// JWT payload for access tokens.
///
/// Wire format: `{"userId": 1, "email": "a@b.com", "iat": ..., "exp": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User identifier
    #[serde(rename = "userId")]
    pub user_id: i64,

    /// Email the user registered with
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an identity issued at `issued_at` and valid for `ttl`.
    ///
    /// # Arguments
    /// * `identity` - Principal to encode
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with `exp = iat + ttl` (whole seconds)
    pub fn for_identity(identity: &IdentityClaim, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = issued_at.timestamp();
        let lifetime = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);

        Self {
            user_id: identity.user_id,
            email: identity.email.clone(),
            iat,
            exp: iat.saturating_add(lifetime),
        }
    }
}

impl From<Claims> for IdentityClaim {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
        }
    }
}
