use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kb_assist::SubmissionOutcome;
use serde::{Deserialize, Serialize};

/// HTTP view of a finished submission. The body is always the full outcome so
/// the page can show extracted text and errors side by side.
pub struct RagResponse(pub SubmissionOutcome);

impl RagResponse {
    pub fn status(&self) -> StatusCode {
        let outcome = &self.0;
        if outcome.result.is_some() {
            StatusCode::OK
        } else if outcome.has_error("SERVICE_CALL_FAILED") {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

impl IntoResponse for RagResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self.0)).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: error.into(),
        }
    }
}
