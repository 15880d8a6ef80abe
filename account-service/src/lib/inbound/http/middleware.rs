use std::sync::Arc;

use auth::Authenticator;
use auth::IdentityClaim;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;

const BEARER_PREFIX: &str = "Bearer ";

/// Why a request was refused by the authorization gate.
///
/// Expired, forged and undecodable tokens all collapse into `InvalidToken`;
/// the precise cause is only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    MissingOrMalformedHeader,
    InvalidToken,
}

impl RejectionReason {
    pub fn message(&self) -> &'static str {
        match self {
            RejectionReason::MissingOrMalformedHeader => "Authorization token not provided",
            RejectionReason::InvalidToken => "Invalid or expired token",
        }
    }
}

impl IntoResponse for RejectionReason {
    fn into_response(self) -> Response {
        ApiError::Unauthorized(self.message().to_string()).into_response()
    }
}

/// Resolve the identity behind a request's `Authorization: Bearer <token>` header.
pub fn authorize(
    headers: &HeaderMap,
    authenticator: &Authenticator,
) -> Result<IdentityClaim, RejectionReason> {
    let token = extract_bearer_token(headers).ok_or_else(|| {
        tracing::warn!("Authorization header missing or malformed");
        RejectionReason::MissingOrMalformedHeader
    })?;

    authenticator.validate_token(token).map_err(|e| {
        if e.is_rejection() {
            tracing::warn!(reason = %e, "Token rejected");
        } else {
            tracing::error!(error = %e, "Token verification failed");
        }
        RejectionReason::InvalidToken
    })
}

/// Middleware that validates bearer tokens and adds the identity to request extensions.
///
/// Rejected requests never reach the downstream handler.
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, RejectionReason> {
    let identity = authorize(req.headers(), &authenticator)?;

    tracing::debug!(user_id = identity.user_id, "Request authorized");
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

// Scheme is case sensitive, separated by exactly one space, token must be non-empty.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?;

    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }

    Some(token)
}
