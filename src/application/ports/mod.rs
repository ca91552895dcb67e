mod inference_gateway;
mod signal_encoder;
mod upload_staging;

pub use inference_gateway::{GatewayError, InferenceGateway};
pub use signal_encoder::{EncoderError, SignalEncoder};
pub use upload_staging::{StagedBatch, StagedFile, StagingError, UploadStaging};
