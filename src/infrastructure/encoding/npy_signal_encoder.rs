use async_trait::async_trait;
use ndarray::Array2;
use ndarray_npy::WriteNpyExt;

use crate::application::ports::{EncoderError, SignalEncoder};
use crate::domain::{ConversionJob, EncodedArtifact, stem_of};

/// In-process encoder writing one `.npy` file per prepared JSON matrix.
///
/// Prepared inputs are sample-major rows, so the array shape is
/// `(samples, channels)`.
pub struct NpySignalEncoder;

#[async_trait]
impl SignalEncoder for NpySignalEncoder {
    async fn encode(&self, job: &ConversionJob) -> Result<Vec<EncodedArtifact>, EncoderError> {
        tokio::fs::create_dir_all(&job.output_dir).await?;

        let mut artifacts = Vec::with_capacity(job.len());
        for input in &job.inputs {
            let invalid = |reason: String| EncoderError::InvalidInput {
                path: input.display().to_string(),
                reason,
            };

            let data = tokio::fs::read(input).await?;
            let rows: Vec<Vec<f64>> =
                serde_json::from_slice(&data).map_err(|e| invalid(e.to_string()))?;
            let array = to_array(rows).map_err(invalid)?;

            let mut encoded = Vec::new();
            array
                .write_npy(&mut encoded)
                .map_err(|e| invalid(e.to_string()))?;

            let stem = stem_of(input).ok_or_else(|| invalid("file has no name".to_string()))?;
            let output = job.output_dir.join(format!("{}.npy", stem));
            tokio::fs::write(&output, encoded).await?;

            artifacts.push(EncodedArtifact::new(input.clone(), output));
        }

        tracing::debug!(count = artifacts.len(), "Signals encoded in-process");
        Ok(artifacts)
    }
}

fn to_array(rows: Vec<Vec<f64>>) -> Result<Array2<f64>, String> {
    let columns = rows.first().map(Vec::len).unwrap_or(0);
    if let Some(index) = rows.iter().position(|row| row.len() != columns) {
        return Err(format!(
            "row {} has {} values, expected {}",
            index,
            rows[index].len(),
            columns
        ));
    }

    let shape = (rows.len(), columns);
    Array2::from_shape_vec(shape, rows.into_iter().flatten().collect())
        .map_err(|e| e.to_string())
}
