use crate::error::BfhlError;
use crate::models::{ApiResponse, Operation};
use crate::services::{execute, metrics};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::time::Instant;

/// `POST /bfhl`: decode the single-key body, run it, wrap the outcome.
///
/// Body rejections from the JSON extractor are answered with the same
/// envelope instead of axum's plain-text default.
pub async fn bfhl(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let start = Instant::now();

    let payload = payload.map_err(|e| BfhlError::MalformedBody(e.body_text()));
    let (operation, result) = match payload {
        Ok(Json(body)) => match Operation::parse(body) {
            Ok(op) => {
                let name = op.name();
                (name, execute(op, state.text_provider.as_ref()).await)
            }
            Err(e) => ("unrecognized", Err(e)),
        },
        Err(e) => ("unrecognized", Err(e)),
    };

    let email = state.config.official_email.as_str();
    let (status, outcome, response) = match result {
        Ok(data) => (StatusCode::OK, "success", ApiResponse::success(email, data)),
        Err(e) => {
            tracing::info!(operation, kind = e.kind(), error = %e, "Rejected bfhl request");
            (
                StatusCode::BAD_REQUEST,
                e.kind(),
                ApiResponse::failure(email, e.to_string()),
            )
        }
    };

    metrics::record_request(operation, outcome, start.elapsed().as_secs_f64());

    (status, Json(response))
}
