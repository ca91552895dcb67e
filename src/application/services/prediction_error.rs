use crate::application::ports::{EncoderError, GatewayError, StagingError};

#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("{0}")]
    Validation(String),
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("invalid signal in {filename}: {reason}")]
    InvalidSignal { filename: String, reason: String },
    #[error("staging failed: {0}")]
    Staging(#[from] StagingError),
    #[error(transparent)]
    Conversion(#[from] EncoderError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
