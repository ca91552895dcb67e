use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::PredictionError;

const PREDICTION_FAILED: &str = "Prediction failed";
const INVALID_UPLOAD: &str = "Invalid upload";

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

pub(super) fn error_response(
    status: StatusCode,
    error: impl Into<String>,
    details: Option<String>,
) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            details,
        }),
    )
        .into_response()
}

pub(super) fn multipart_error_response(e: MultipartError) -> Response {
    tracing::error!(error = %e, "Failed to read multipart");
    error_response(
        e.status(),
        format!("Failed to read multipart: {}", e.body_text()),
        None,
    )
}

pub(super) fn prediction_error_response(e: &PredictionError) -> Response {
    match e {
        PredictionError::Validation(message) => {
            tracing::warn!(error = %message, "Rejected prediction request");
            error_response(StatusCode::BAD_REQUEST, message.clone(), None)
        }
        PredictionError::UnsupportedFormat(_) | PredictionError::InvalidSignal { .. } => {
            tracing::warn!(error = %e, "Rejected upload content");
            error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                INVALID_UPLOAD,
                Some(e.to_string()),
            )
        }
        PredictionError::Staging(_)
        | PredictionError::Conversion(_)
        | PredictionError::Gateway(_) => {
            tracing::error!(error = %e, "Prediction failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                PREDICTION_FAILED,
                Some(e.to_string()),
            )
        }
    }
}
