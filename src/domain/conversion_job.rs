use std::path::{Path, PathBuf};

/// A batch of prepared signal files handed to an encoder in one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub inputs: Vec<PathBuf>,
    pub output_dir: PathBuf,
}

impl ConversionJob {
    pub fn new(inputs: Vec<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            inputs,
            output_dir: output_dir.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// One encoded output, keyed by the input it was produced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedArtifact {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl EncodedArtifact {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    pub fn output_name(&self) -> String {
        file_name_of(&self.output)
    }
}

/// File stem used to pair encoder outputs with their inputs.
pub fn stem_of(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}
