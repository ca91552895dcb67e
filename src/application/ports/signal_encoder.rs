use async_trait::async_trait;

use crate::domain::{ConversionJob, EncodedArtifact};

/// Turns prepared signal files into binary array files.
///
/// Implementations return exactly one artifact per input, in input order,
/// or fail the whole batch.
#[async_trait]
pub trait SignalEncoder: Send + Sync {
    async fn encode(&self, job: &ConversionJob) -> Result<Vec<EncodedArtifact>, EncoderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EncoderError {
    #[error("conversion failed: {0}")]
    ConversionFailed(String),
    #[error("encoder output does not match inputs: {0}")]
    MismatchedOutput(String),
    #[error("invalid input {path}: {reason}")]
    InvalidInput { path: String, reason: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
