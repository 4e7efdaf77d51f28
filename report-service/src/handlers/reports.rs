use crate::report::GenerationFailure;
use crate::services::{record_report_failure, record_report_generated};
use crate::startup::AppState;
use axum::{extract::State, http::header, response::IntoResponse};
use std::time::Instant;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const PDF_CONTENT_DISPOSITION: &str = "attachment; filename=\"complex_report.pdf\"";

/// `GET /api/pdf/generate`
///
/// Layout and serialization are CPU-bound, so they run on the blocking pool.
pub async fn generate_pdf(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GenerationFailure> {
    let start = Instant::now();
    let report = state.report.clone();

    let result = match tokio::task::spawn_blocking(move || report.generate()).await {
        Ok(result) => result,
        Err(e) => Err(GenerationFailure::from(e)),
    };

    match result {
        Ok(bytes) => {
            let elapsed = start.elapsed();
            record_report_generated(elapsed, bytes.len());
            tracing::info!(
                size_bytes = bytes.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Report generated"
            );

            Ok((
                [
                    (header::CONTENT_TYPE, PDF_CONTENT_TYPE),
                    (header::CONTENT_DISPOSITION, PDF_CONTENT_DISPOSITION),
                ],
                bytes,
            ))
        }
        Err(e) => {
            record_report_failure(e.kind());
            tracing::error!(error = %e, "Report generation failed");
            Err(e)
        }
    }
}
