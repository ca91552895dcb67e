use std::sync::Arc;

use crate::application::services::{ImagePredictionService, SignalPredictionService};
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub image_service: Arc<ImagePredictionService>,
    pub signal_service: Arc<SignalPredictionService>,
    pub settings: Settings,
}
