//! # Blob Storage
//!
//! Evidence files uploaded alongside activities. Blobs are addressed by an
//! opaque UUID; activities only hold the ids.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

/// Everything known about a stored blob apart from its bytes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobMetadata {
    pub id: String,
    pub file_name: String,
    pub content_type: String,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Saves the given bytes under a freshly generated id
    async fn save(&self, file_name: &str, content_type: &str, bytes: Vec<u8>) -> Result<BlobMetadata>;

    /// Loads a blob and its metadata, `None` when the id is unknown
    async fn open(&self, blob_id: &str) -> Result<Option<(BlobMetadata, Vec<u8>)>>;

    async fn exists(&self, blob_id: &str) -> Result<bool>;
}

/// A store that keeps each blob as a file plus a JSON metadata sidecar
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Creates the store, making `root` if needed
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("Failed to create blob directory {}", root.display()))?;
        Ok(Self { root })
    }

    fn blob_path(&self, id: &Uuid) -> PathBuf {
        self.root.join(id.to_string())
    }

    fn metadata_path(&self, id: &Uuid) -> PathBuf {
        self.root.join(format!("{}.json", id))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn save(&self, file_name: &str, content_type: &str, bytes: Vec<u8>) -> Result<BlobMetadata> {
        let id = Uuid::new_v4();
        let metadata = BlobMetadata {
            id: id.to_string(),
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            size: bytes.len() as u64,
            uploaded_at: Utc::now(),
        };

        tokio::fs::write(self.blob_path(&id), &bytes)
            .await
            .with_context(|| format!("Failed to write blob {}", id))?;
        tokio::fs::write(self.metadata_path(&id), serde_json::to_vec(&metadata)?)
            .await
            .with_context(|| format!("Failed to write metadata for blob {}", id))?;

        debug!("Stored blob {} ({} bytes)", id, metadata.size);
        Ok(metadata)
    }

    async fn open(&self, blob_id: &str) -> Result<Option<(BlobMetadata, Vec<u8>)>> {
        // Anything that is not a UUID never reaches the filesystem
        let Ok(id) = Uuid::parse_str(blob_id) else {
            return Ok(None);
        };

        let raw_metadata = match tokio::fs::read(self.metadata_path(&id)).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("Failed to read metadata for blob {}", id)),
        };
        let metadata: BlobMetadata = serde_json::from_slice(&raw_metadata)?;

        let bytes = tokio::fs::read(self.blob_path(&id))
            .await
            .with_context(|| format!("Failed to read blob {}", id))?;

        Ok(Some((metadata, bytes)))
    }

    async fn exists(&self, blob_id: &str) -> Result<bool> {
        let Ok(id) = Uuid::parse_str(blob_id) else {
            return Ok(false);
        };
        Ok(tokio::fs::try_exists(self.metadata_path(&id)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_open_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new(dir.path().join("files")).await.unwrap();

        let metadata = store
            .save("receipt.png", "image/png", vec![1, 2, 3, 4])
            .await
            .unwrap();
        assert_eq!(metadata.size, 4);
        assert!(store.exists(&metadata.id).await.unwrap());

        let (loaded, bytes) = store.open(&metadata.id).await.unwrap().unwrap();
        assert_eq!(loaded, metadata);
        assert_eq!(bytes, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new(dir.path()).await.unwrap();

        assert!(store.open(&Uuid::new_v4().to_string()).await.unwrap().is_none());
        assert!(store.open("../../etc/passwd").await.unwrap().is_none());
        assert!(!store.exists("not-a-uuid").await.unwrap());
    }
}
