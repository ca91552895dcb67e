use axum::Json;
use serde::Serialize;

use crate::domain::ModelTag;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub models: Vec<&'static str>,
}

/// Liveness check. Does not contact the inference gateway.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        models: ModelTag::ALL.iter().map(ModelTag::as_str).collect(),
    })
}
