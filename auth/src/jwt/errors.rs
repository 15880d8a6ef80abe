use thiserror::Error;

/// Error type for JWT operations.
///
/// `Expired`, `InvalidSignature` and `Malformed` describe a bad token presented
/// by a caller. The remaining variants are system faults on our side.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token service is misconfigured: {0}")]
    Misconfigured(String),

    #[error("Signing secret too short: minimum {min} bytes, got {actual}")]
    SecretTooShort { min: usize, actual: usize },
}

impl JwtError {
    /// True when the token itself was rejected, false for system faults.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            JwtError::Expired | JwtError::InvalidSignature | JwtError::Malformed(_)
        )
    }
}
