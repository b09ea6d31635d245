// Error taxonomy surfaced by the API.
//
// The store itself never errors for expected conditions (missing file,
// missing record); those come back as sentinels. This type is for turning
// sentinels and real failures into response codes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Requested record does not exist. Carries the resource noun so the
    /// message reads "Lead not found", "Blog post not found", etc.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Client sent a payload that fails a required-field or uniqueness check.
    #[error("{0}")]
    Validation(String),

    /// Underlying persistence failure.
    #[error(transparent)]
    Storage(#[from] eyre::Report),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            Error::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::Storage(report) => {
                error!(error = ?report, "Storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
