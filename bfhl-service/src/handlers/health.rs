use crate::models::ApiResponse;
use crate::startup::AppState;
use axum::{extract::State, Json};

/// Liveness check. Always succeeds.
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse> {
    Json(ApiResponse::healthy(state.config.official_email.as_str()))
}
