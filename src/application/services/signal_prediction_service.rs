use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use crate::application::ports::{
    EncoderError, InferenceGateway, SignalEncoder, StagedBatch, StagedFile, StagingError,
    UploadStaging,
};
use crate::domain::{
    ConversionJob, ModelTag, SignalError, SignalMatrix, UploadedFile, decimation_factor, stem_of,
};

use super::prediction_error::PredictionError;
use super::signal_loader::loader_for;

pub const NO_SIGNALS_MESSAGE: &str = "No ECG files received";

const PREPARED_DIR: &str = "prepared";
const ENCODED_DIR: &str = "encoded";
const ENCODED_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone)]
pub struct SignalPipelineOptions {
    pub channel_count: usize,
    pub target_samples: usize,
    pub downsample_factor: Option<usize>,
}

impl Default for SignalPipelineOptions {
    fn default() -> Self {
        Self {
            channel_count: 12,
            target_samples: 1000,
            downsample_factor: None,
        }
    }
}

/// Stages ECG uploads, decimates them, encodes them to array files and
/// forwards the encoded batch to the gateway.
pub struct SignalPredictionService {
    staging: Arc<dyn UploadStaging>,
    encoder: Arc<dyn SignalEncoder>,
    gateway: Arc<dyn InferenceGateway>,
    options: SignalPipelineOptions,
}

impl SignalPredictionService {
    pub fn new(
        staging: Arc<dyn UploadStaging>,
        encoder: Arc<dyn SignalEncoder>,
        gateway: Arc<dyn InferenceGateway>,
        options: SignalPipelineOptions,
    ) -> Self {
        Self {
            staging,
            encoder,
            gateway,
            options,
        }
    }

    pub async fn predict(
        &self,
        request_id: &str,
        files: Vec<UploadedFile>,
    ) -> Result<Value, PredictionError> {
        if files.is_empty() {
            return Err(PredictionError::Validation(NO_SIGNALS_MESSAGE.to_string()));
        }

        let batch = self.staging.stage(request_id, &files).await?;
        tracing::debug!(dir = %batch.path().display(), files = files.len(), "Uploads staged");

        let outcome = self.run(&batch).await;

        if let Err(e) = batch.close().await {
            tracing::warn!(error = %e, "Failed to remove scratch files");
        }

        outcome
    }

    async fn run(&self, batch: &StagedBatch) -> Result<Value, PredictionError> {
        let prepared_dir = batch.subdir(PREPARED_DIR).await?;
        let encoded_dir = batch.subdir(ENCODED_DIR).await?;

        let mut inputs = Vec::with_capacity(batch.files().len());
        for staged in batch.files() {
            inputs.push(self.prepare(staged, &prepared_dir).await?);
        }

        let job = ConversionJob::new(inputs, encoded_dir);
        let artifacts = self.encoder.encode(&job).await?;

        if artifacts.len() != job.len() {
            return Err(EncoderError::MismatchedOutput(format!(
                "{} inputs produced {} outputs",
                job.len(),
                artifacts.len()
            ))
            .into());
        }

        let mut encoded = Vec::with_capacity(artifacts.len());
        for ((artifact, input), staged) in artifacts.iter().zip(&job.inputs).zip(batch.files()) {
            if artifact.input != *input {
                return Err(EncoderError::MismatchedOutput(format!(
                    "expected output for {}, got {}",
                    input.display(),
                    artifact.input.display()
                ))
                .into());
            }
            let bytes = tokio::fs::read(&artifact.output)
                .await
                .map_err(EncoderError::Io)?;
            encoded.push(UploadedFile::new(
                encoded_name(&staged.original_name),
                ENCODED_MIME,
                bytes,
            ));
        }

        tracing::info!(count = encoded.len(), "Forwarding encoded signals to gateway");
        let result = self.gateway.predict(ModelTag::HeartDisease, &encoded).await?;
        Ok(result)
    }

    async fn prepare(
        &self,
        staged: &StagedFile,
        prepared_dir: &Path,
    ) -> Result<PathBuf, PredictionError> {
        let invalid = |e: SignalError| PredictionError::InvalidSignal {
            filename: staged.original_name.clone(),
            reason: e.to_string(),
        };

        let matrix = self.load_signal(staged).await?;
        let factor = self.factor_for(&matrix).map_err(invalid)?;
        let reduced = matrix.downsample(factor).map_err(invalid)?;
        if self.options.downsample_factor.is_none() {
            reduced
                .ensure_sample_count(self.options.target_samples)
                .map_err(invalid)?;
        }

        tracing::debug!(
            file = %staged.original_name,
            channels = reduced.channel_count(),
            samples_in = matrix.sample_count(),
            samples_out = reduced.sample_count(),
            factor,
            "Signal downsampled"
        );

        let stem = stem_of(&staged.path).unwrap_or("signal");
        let path = prepared_dir.join(format!("{}.json", stem));
        let body =
            serde_json::to_vec(&reduced.to_rows()).map_err(|e| StagingError::Io(e.into()))?;
        tokio::fs::write(&path, body)
            .await
            .map_err(StagingError::Io)?;
        Ok(path)
    }

    async fn load_signal(&self, staged: &StagedFile) -> Result<SignalMatrix, PredictionError> {
        let extension = staged
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        let loader = extension
            .as_deref()
            .and_then(loader_for)
            .ok_or_else(|| PredictionError::UnsupportedFormat(staged.original_name.clone()))?;

        let data = tokio::fs::read(&staged.path)
            .await
            .map_err(StagingError::Io)?;
        loader(&data, self.options.channel_count).map_err(|reason| {
            PredictionError::InvalidSignal {
                filename: staged.original_name.clone(),
                reason,
            }
        })
    }

    fn factor_for(&self, matrix: &SignalMatrix) -> Result<usize, SignalError> {
        match self.options.downsample_factor {
            Some(factor) => Ok(factor),
            None if matrix.sample_count() <= self.options.target_samples => Ok(1),
            None => decimation_factor(matrix.sample_count(), self.options.target_samples),
        }
    }
}

fn encoded_name(original_name: &str) -> String {
    let stem = Path::new(original_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("signal");
    format!("{}.npy", stem)
}
