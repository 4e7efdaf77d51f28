use crate::pdf::PdfError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::path::PathBuf;
use thiserror::Error;

/// Any failure while producing a report. Callers never receive partial output.
#[derive(Debug, Error)]
pub enum GenerationFailure {
    #[error("image asset {} could not be read: {source}", .path.display())]
    AssetUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image asset {} is not a decodable image: {source}", .path.display())]
    AssetInvalid {
        path: PathBuf,
        #[source]
        source: PdfError,
    },

    #[error("document assembly failed: {0}")]
    Assembly(#[from] PdfError),

    #[error("generation task did not complete: {0}")]
    Interrupted(#[from] tokio::task::JoinError),
}

impl GenerationFailure {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationFailure::AssetUnreadable { .. } => "asset_unreadable",
            GenerationFailure::AssetInvalid { .. } => "asset_invalid",
            GenerationFailure::Assembly(_) => "assembly",
            GenerationFailure::Interrupted(_) => "interrupted",
        }
    }
}

/// Diagnostics stay in the logs; the client only sees a bare 500.
impl IntoResponse for GenerationFailure {
    fn into_response(self) -> Response {
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
