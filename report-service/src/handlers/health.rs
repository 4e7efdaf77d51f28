use crate::services::get_metrics;
use crate::startup::AppState;
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use service_core::error::AppError;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "report-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Ready once the bundled image is a readable file; every report depends on it.
pub async fn readiness_check(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let path = state.report.image_path();
    match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => {
            Ok((StatusCode::OK, Json(json!({ "status": "ready" }))))
        }
        Ok(_) => {
            tracing::warn!(path = %path.display(), "Report image asset is not a regular file");
            Err(AppError::ServiceUnavailable)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Report image asset unavailable");
            Err(AppError::ServiceUnavailable)
        }
    }
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("No route for {}", uri.path()))
}
