use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(reason = %rejection.body_text(), "Registration body rejected");
        ApiError::UnprocessableEntity("Invalid request body".to_string())
    })?;
    let ttl = state.authenticator.token_ttl();

    state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|session| {
            ApiSuccess::new(
                StatusCode::OK,
                TokenResponseData::new(session.access_token, ttl),
            )
        })
}

/// HTTP request body for registration (raw JSON)
///
/// Missing fields deserialize as empty and are reported by field validation.
#[derive(Deserialize)]
pub struct RegisterRequestBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// Every field that failed validation, not just the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ParseRegisterRequestError {
    email: Option<EmailError>,
    password: Option<PasswordPolicyError>,
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        match (EmailAddress::new(self.email), Password::new(self.password)) {
            (Ok(email), Ok(password)) => Ok(RegisterCommand::new(email, password)),
            (email, password) => Err(ParseRegisterRequestError {
                email: email.err(),
                password: password.err(),
            }),
        }
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        let mut details = BTreeMap::new();
        if let Some(e) = err.email {
            details.insert("email".to_string(), e.to_string());
        }
        if let Some(e) = err.password {
            details.insert("password".to_string(), e.to_string());
        }
        ApiError::ValidationFailed(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(email: &str, password: &str) -> RegisterRequestBody {
        RegisterRequestBody {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_body_becomes_command() {
        let command = body("a@b.com", "Abc12345!").try_into_command().unwrap();
        assert_eq!(command.email.as_str(), "a@b.com");
    }

    #[test]
    fn test_all_invalid_fields_are_reported() {
        let error = body("not-an-email", "short").try_into_command().unwrap_err();

        assert!(matches!(error.email, Some(EmailError::InvalidFormat(_))));
        assert_eq!(
            error.password,
            Some(PasswordPolicyError::TooShort { min: 8, actual: 5 })
        );

        let ApiError::ValidationFailed(details) = ApiError::from(error) else {
            panic!("expected validation error");
        };
        assert_eq!(
            details.keys().collect::<Vec<_>>(),
            vec!["email", "password"]
        );
        assert_eq!(
            details["password"],
            "Password too short: minimum 8 characters, got 5"
        );
    }

    #[test]
    fn test_missing_fields_are_reported_as_empty() {
        let parsed: RegisterRequestBody =
            serde_json::from_value(serde_json::json!({ "email": "a@b.com" })).unwrap();

        let error = parsed.try_into_command().unwrap_err();
        assert_eq!(error.email, None);
        assert_eq!(error.password, Some(PasswordPolicyError::Empty));
    }
}
