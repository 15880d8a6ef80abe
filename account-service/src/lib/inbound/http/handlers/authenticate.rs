use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::Password;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn authenticate(
    State(state): State<AppState>,
    body: Result<Json<AuthenticateRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    // Malformed input gets the same answer as a wrong password
    let invalid_credentials = || ApiError::from(UserError::InvalidCredentials);
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(reason = %rejection.body_text(), "Login body rejected");
        invalid_credentials()
    })?;
    let email = EmailAddress::new(body.email).map_err(|_| invalid_credentials())?;
    let password = Password::for_login(body.password).map_err(|_| invalid_credentials())?;

    let session = state
        .user_service
        .login(LoginCommand::new(email, password))
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TokenResponseData::new(session.access_token, state.authenticator.token_ttl()),
    ))
}

#[derive(Deserialize)]
pub struct AuthenticateRequestBody {
    email: String,
    password: String,
}
