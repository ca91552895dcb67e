use std::sync::Arc;

use crate::application::ports::{EncoderError, SignalEncoder};
use crate::presentation::config::{EncoderProvider, EncoderSettings};

use super::npy_signal_encoder::NpySignalEncoder;
use super::process_signal_encoder::ProcessSignalEncoder;

pub struct SignalEncoderFactory;

impl SignalEncoderFactory {
    pub fn create(settings: &EncoderSettings) -> Result<Arc<dyn SignalEncoder>, EncoderError> {
        match settings.provider {
            EncoderProvider::Native => Ok(Arc::new(NpySignalEncoder)),
            EncoderProvider::Process => {
                let program = settings
                    .program
                    .as_deref()
                    .filter(|p| !p.trim().is_empty())
                    .ok_or_else(|| {
                        EncoderError::ConversionFailed(
                            "encoder.program required for process provider".to_string(),
                        )
                    })?;
                Ok(Arc::new(ProcessSignalEncoder::new(
                    program,
                    settings.args.clone(),
                )))
            }
        }
    }
}
