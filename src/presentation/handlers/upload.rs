use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;

use crate::domain::UploadedFile;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Reads every part named `field_name`; other parts are ignored.
pub(super) async fn collect_files(
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<Vec<UploadedFile>, MultipartError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(field_name) {
            tracing::debug!(field = ?field.name(), "Ignoring multipart field");
            continue;
        }

        let filename = field.file_name().unwrap_or("unknown").to_string();
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let data = field.bytes().await?;

        tracing::debug!(
            filename = %filename,
            content_type = %content_type,
            bytes = data.len(),
            "File received"
        );

        files.push(UploadedFile::new(filename, content_type, data));
    }

    Ok(files)
}
