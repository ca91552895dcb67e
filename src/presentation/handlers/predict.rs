use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Serialize;

use crate::domain::PredictionResult;
use crate::infrastructure::observability::RequestId;
use crate::presentation::state::AppState;

use super::error::{multipart_error_response, prediction_error_response};
use super::upload::collect_files;

pub const IMAGES_FIELD: &str = "images";
pub const ECG_FILES_FIELD: &str = "ecg_files";

#[derive(Serialize)]
pub struct PredictionsResponse {
    pub predictions: Vec<PredictionResult>,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn brain_tumor_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let images = match collect_files(&mut multipart, IMAGES_FIELD).await {
        Ok(files) => files,
        Err(e) => return multipart_error_response(e),
    };

    tracing::info!(count = images.len(), "Brain tumor prediction requested");

    match state.image_service.predict(images).await {
        Ok(predictions) => {
            (StatusCode::OK, Json(PredictionsResponse { predictions })).into_response()
        }
        Err(e) => prediction_error_response(&e),
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn heart_disease_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let files = match collect_files(&mut multipart, ECG_FILES_FIELD).await {
        Ok(files) => files,
        Err(e) => return multipart_error_response(e),
    };

    tracing::info!(count = files.len(), "Heart disease prediction requested");

    match state.signal_service.predict(request_id.as_str(), files).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => prediction_error_response(&e),
    }
}
