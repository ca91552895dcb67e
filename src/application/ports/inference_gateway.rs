use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{ModelTag, UploadedFile};

/// Remote model-serving endpoint. The response envelope belongs to the
/// remote service and is returned untouched.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    async fn predict(&self, model: ModelTag, files: &[UploadedFile]) -> Result<Value, GatewayError>;

    async fn warm_up(&self) -> Result<(), GatewayError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("gateway connection failed: {0}")]
    Connection(String),
    #[error("gateway returned status {status}: {body}")]
    Remote { status: u16, body: String },
    #[error("invalid gateway response: {0}")]
    InvalidResponse(String),
    #[error("gateway misconfigured: {0}")]
    Configuration(String),
}
