use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{EncoderError, SignalEncoder};
use crate::domain::{ConversionJob, EncodedArtifact, stem_of};

/// Delegates encoding to an external program.
///
/// The program is invoked once per batch as `program [args..] inputs..
/// output_dir` and must print the comma-separated output paths on the last
/// line of stdout. Any non-zero exit fails the whole batch.
pub struct ProcessSignalEncoder {
    program: String,
    args: Vec<String>,
}

impl ProcessSignalEncoder {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl SignalEncoder for ProcessSignalEncoder {
    async fn encode(&self, job: &ConversionJob) -> Result<Vec<EncodedArtifact>, EncoderError> {
        // The converter treats its last argument as the output directory.
        if job.is_empty() {
            return Ok(Vec::new());
        }
        tokio::fs::create_dir_all(&job.output_dir).await?;

        tracing::debug!(
            program = %self.program,
            inputs = job.len(),
            output_dir = %job.output_dir.display(),
            "Invoking external encoder"
        );

        let output = Command::new(&self.program)
            .args(&self.args)
            .args(&job.inputs)
            .arg(&job.output_dir)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                EncoderError::ConversionFailed(format!("failed to start {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::error!(
                program = %self.program,
                exit_code = output.status.code().unwrap_or(-1),
                stderr = %stderr,
                "External encoder failed"
            );
            return Err(EncoderError::ConversionFailed(format!(
                "{} exited with {}: {}",
                self.program, output.status, stderr
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let outputs = parse_output_paths(&stdout);
        pair_by_stem(&job.inputs, outputs)
    }
}

/// Reads the comma-separated path list from the last non-empty stdout line.
pub fn parse_output_paths(stdout: &str) -> Vec<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .map(|line| {
            line.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Pairs outputs with inputs by file stem, returning artifacts in input
/// order.
pub fn pair_by_stem(
    inputs: &[PathBuf],
    outputs: Vec<PathBuf>,
) -> Result<Vec<EncodedArtifact>, EncoderError> {
    if outputs.len() != inputs.len() {
        return Err(EncoderError::MismatchedOutput(format!(
            "{} inputs produced {} outputs",
            inputs.len(),
            outputs.len()
        )));
    }

    let mut by_stem: HashMap<String, PathBuf> = HashMap::with_capacity(outputs.len());
    for output in outputs {
        let stem = stem_of(&output)
            .ok_or_else(|| {
                EncoderError::MismatchedOutput(format!("unnamed output {}", output.display()))
            })?
            .to_string();
        if by_stem.contains_key(&stem) {
            return Err(EncoderError::MismatchedOutput(format!(
                "duplicate output for {}",
                stem
            )));
        }
        by_stem.insert(stem, output);
    }

    inputs
        .iter()
        .map(|input| {
            stem_of(input)
                .and_then(|stem| by_stem.remove(stem))
                .map(|output| EncodedArtifact::new(input.clone(), output))
                .ok_or_else(|| {
                    EncoderError::MismatchedOutput(format!("no output for {}", input.display()))
                })
        })
        .collect()
}
