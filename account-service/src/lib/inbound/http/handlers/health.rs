use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn health(State(state): State<AppState>) -> ApiSuccess<HealthResponseData> {
    let uptime_seconds = state.started_at.elapsed().as_secs();

    match state.user_service.check_health().await {
        Ok(()) => ApiSuccess::new(
            StatusCode::OK,
            HealthResponseData {
                status: "OK",
                timestamp: Utc::now(),
                uptime_seconds,
                database: "connected",
            },
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            ApiSuccess::new(
                StatusCode::SERVICE_UNAVAILABLE,
                HealthResponseData {
                    status: "ERROR",
                    timestamp: Utc::now(),
                    uptime_seconds,
                    database: "disconnected",
                },
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponseData {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub database: &'static str,
}
