//! HTTP handlers for the bfhl service.

pub mod bfhl;
pub mod health;
pub mod metrics;

use axum::http::Uri;
use service_core::error::AppError;

/// Router fallback for unknown paths.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("No route for {}", uri.path()))
}
