mod image_prediction_service;
mod prediction_error;
mod response_reshaper;
mod signal_loader;
mod signal_prediction_service;

pub use image_prediction_service::{ImagePredictionService, NO_IMAGES_MESSAGE};
pub use prediction_error::PredictionError;
pub use response_reshaper::reshape_predictions;
pub use signal_prediction_service::{
    NO_SIGNALS_MESSAGE, SignalPipelineOptions, SignalPredictionService,
};
