mod error;
mod health;
mod predict;
mod upload;

pub use error::ErrorResponse;
pub use health::health_handler;
pub use predict::{
    ECG_FILES_FIELD, IMAGES_FIELD, PredictionsResponse, brain_tumor_handler,
    heart_disease_handler,
};
