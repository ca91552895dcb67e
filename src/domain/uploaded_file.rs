use std::path::{Component, Path};

use bytes::Bytes;

const FALLBACK_NAME: &str = "upload";

/// A file received from a multipart request, held in memory until it is
/// staged or forwarded.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub original_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(
        original_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            original_name: original_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Name usable as a single on-disk path component.
    pub fn safe_name(&self) -> String {
        let normalized = self.original_name.replace('\\', "/");
        Path::new(&normalized)
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => part.to_str(),
                _ => None,
            })
            .last()
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| FALLBACK_NAME.to_string())
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}
