use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::domain::UploadedFile;

#[async_trait::async_trait]
pub trait UploadStaging: Send + Sync {
    /// Writes `files` into a fresh directory owned by the returned batch.
    async fn stage(
        &self,
        request_id: &str,
        files: &[UploadedFile],
    ) -> Result<StagedBatch, StagingError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub original_name: String,
    pub path: PathBuf,
}

/// Scratch files of one request. The directory is removed on `close` or
/// when the batch is dropped.
#[derive(Debug)]
pub struct StagedBatch {
    dir: TempDir,
    files: Vec<StagedFile>,
}

impl StagedBatch {
    pub fn new(dir: TempDir, files: Vec<StagedFile>) -> Self {
        Self { dir, files }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    pub async fn subdir(&self, name: &str) -> Result<PathBuf, StagingError> {
        let path = self.dir.path().join(name);
        tokio::fs::create_dir_all(&path).await?;
        Ok(path)
    }

    /// Removes the directory tree on the blocking pool.
    pub async fn close(self) -> Result<(), StagingError> {
        let dir = self.dir;
        tokio::task::spawn_blocking(move || dir.close())
            .await
            .map_err(|e| StagingError::CleanupFailed(e.to_string()))?
            .map_err(|e| StagingError::CleanupFailed(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("scratch directory unavailable: {0}")]
    ScratchUnavailable(String),
    #[error("write failed for {name}: {source}")]
    WriteFailed {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("cleanup failed: {0}")]
    CleanupFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
