use std::sync::Arc;

use crate::application::ports::InferenceGateway;
use crate::domain::{ModelTag, PredictionResult, UploadedFile};

use super::prediction_error::PredictionError;
use super::response_reshaper::reshape_predictions;

pub const NO_IMAGES_MESSAGE: &str = "No images received";

/// Forwards scan images to the gateway and reshapes its answer.
pub struct ImagePredictionService {
    gateway: Arc<dyn InferenceGateway>,
}

impl ImagePredictionService {
    pub fn new(gateway: Arc<dyn InferenceGateway>) -> Self {
        Self { gateway }
    }

    pub async fn predict(
        &self,
        images: Vec<UploadedFile>,
    ) -> Result<Vec<PredictionResult>, PredictionError> {
        if images.is_empty() {
            return Err(PredictionError::Validation(NO_IMAGES_MESSAGE.to_string()));
        }

        let names: Vec<String> = images.iter().map(|f| f.original_name.clone()).collect();
        tracing::info!(count = images.len(), files = ?names, "Forwarding images to gateway");

        let raw = self.gateway.predict(ModelTag::BrainTumor, &images).await?;
        let predictions = reshape_predictions(&raw, &names);

        tracing::info!(
            items = predictions.len(),
            failed = predictions.iter().filter(|p| p.is_error()).count(),
            "Predictions ready"
        );

        Ok(predictions)
    }
}
