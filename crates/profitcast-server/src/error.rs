//! HTTP error responses with explicit status codes.
//!
//! Failures never ride in a success-shaped body: a caller can distinguish a
//! genuine prediction from a failed one by status code alone, and the body
//! carries a machine-readable kind on top of the human-readable message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use profitcast_model::PredictError;
use serde_json::json;

/// An API-visible error: status code, stable kind, message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

impl ApiError {
    /// Artifacts never loaded; the service is live but cannot predict.
    pub fn not_ready() -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            kind: "not_ready",
            message: "models not loaded".into(),
        }
    }
}

impl From<PredictError> for ApiError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::UnknownState { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                kind: "invalid_state",
                message: err.to_string(),
            },
            PredictError::FeatureMismatch(_) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                kind: "inference",
                message: err.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": { "kind": self.kind, "message": self.message }
        }));
        (self.status, body).into_response()
    }
}
