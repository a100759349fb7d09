//! Evidence file upload and download.
use std::sync::Arc;
use tracing::info;

use crate::domain::errors::{ReportError, ReportResult};
use crate::storage::{BlobMetadata, BlobStore};

const MAX_FILE_NAME_LENGTH: usize = 255;
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Clone)]
pub struct FileService {
    blob_store: Arc<dyn BlobStore>,
}

impl FileService {
    pub fn new(blob_store: Arc<dyn BlobStore>) -> Self {
        Self { blob_store }
    }

    pub async fn upload(
        &self,
        file_name: Option<&str>,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> ReportResult<BlobMetadata> {
        if bytes.is_empty() {
            return Err(ReportError::validation("Uploaded file is empty"));
        }

        let file_name = sanitize_file_name(file_name.unwrap_or_default());
        let content_type = content_type
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE);

        let metadata = self
            .blob_store
            .save(&file_name, content_type, bytes)
            .await
            .map_err(ReportError::DataUnavailable)?;

        info!("Stored file {} ({}, {} bytes)", metadata.id, metadata.file_name, metadata.size);
        Ok(metadata)
    }

    pub async fn open(&self, file_id: &str) -> ReportResult<(BlobMetadata, Vec<u8>)> {
        self.blob_store
            .open(file_id)
            .await
            .map_err(ReportError::DataUnavailable)?
            .ok_or_else(|| ReportError::not_found("File", file_id))
    }
}

/// Keeps only the last path segment and drops control characters
fn sanitize_file_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter(|c| !c.is_control() && *c != '"')
        .take(MAX_FILE_NAME_LENGTH)
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
