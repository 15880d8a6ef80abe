use auth::IdentityClaim;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Return the account behind the bearer token.
///
/// Runs behind the authorization gate, which has already placed the
/// verified identity in the request extensions.
pub async fn verify(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityClaim>,
) -> Result<ApiSuccess<VerifyResponseData>, ApiError> {
    state
        .user_service
        .get_user(&UserId(identity.user_id))
        .await
        .map_err(ApiError::from)
        .map(|ref user| {
            ApiSuccess::new(
                StatusCode::OK,
                VerifyResponseData {
                    user: user.into(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyResponseData {
    pub user: UserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub email: String,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            email: user.email.as_str().to_string(),
        }
    }
}
