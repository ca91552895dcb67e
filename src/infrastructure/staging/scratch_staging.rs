use std::path::{Path, PathBuf};

use crate::application::ports::{
    StagedBatch, StagedFile, StagingError, UploadStaging,
};
use crate::domain::UploadedFile;

const MAX_REQUEST_ID_CHARS: usize = 64;

/// Stages uploads under a local scratch root, one directory per request.
pub struct ScratchStaging {
    root: PathBuf,
}

impl ScratchStaging {
    pub fn new(root: PathBuf) -> Result<Self, StagingError> {
        std::fs::create_dir_all(&root).map_err(|e| {
            StagingError::ScratchUnavailable(format!("{}: {}", root.display(), e))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait::async_trait]
impl UploadStaging for ScratchStaging {
    async fn stage(
        &self,
        request_id: &str,
        files: &[UploadedFile],
    ) -> Result<StagedBatch, StagingError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            StagingError::ScratchUnavailable(format!("{}: {}", self.root.display(), e))
        })?;

        let dir = tempfile::Builder::new()
            .prefix(&format!("req-{}-", sanitize_request_id(request_id)))
            .tempdir_in(&self.root)
            .map_err(|e| StagingError::ScratchUnavailable(e.to_string()))?;

        let mut staged = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            let path = dir.path().join(format!("{}-{}", index, file.safe_name()));
            tokio::fs::write(&path, &file.bytes)
                .await
                .map_err(|source| StagingError::WriteFailed {
                    name: file.original_name.clone(),
                    source,
                })?;

            tracing::debug!(
                file = %file.original_name,
                bytes = file.size(),
                path = %path.display(),
                "File staged"
            );

            staged.push(StagedFile {
                original_name: file.original_name.clone(),
                path,
            });
        }

        Ok(StagedBatch::new(dir, staged))
    }
}

fn sanitize_request_id(request_id: &str) -> String {
    let cleaned: String = request_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .take(MAX_REQUEST_ID_CHARS)
        .collect();
    if cleaned.is_empty() {
        "anon".to_string()
    } else {
        cleaned
    }
}
