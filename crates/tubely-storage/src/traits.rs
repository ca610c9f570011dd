//! Storage abstraction trait
//!
//! This module defines the Storage trait that both thumbnail backends implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tubely_core::AppError;
use uuid::Uuid;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => AppError::NotFound(format!("Asset {} not found", key)),
            StorageError::KeyGeneration(msg) => {
                AppError::Internal(format!("Failed to generate asset key: {}", msg))
            }
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Bytes previously written together with the media type they were declared as.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAsset {
    pub data: Bytes,
    pub content_type: String,
}

/// Storage abstraction trait
///
/// The upload pipeline only talks to this trait, so the choice between the local and
/// in-memory stores is made once at configuration time.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;

    /// Derive the key a new thumbnail for `video_id` is written under.
    ///
    /// `extension` is the canonical extension of the validated media type.
    fn thumbnail_key(&self, video_id: Uuid, extension: &str) -> StorageResult<String>;

    /// Persist `data` under `storage_key`, replacing anything already stored there.
    ///
    /// Returning `Ok` means a later `get` with the same key sees exactly these bytes.
    async fn put(&self, storage_key: &str, content_type: &str, data: Bytes) -> StorageResult<()>;

    /// Read back the bytes and media type stored under `storage_key`.
    async fn get(&self, storage_key: &str) -> StorageResult<StoredAsset>;

    /// Check if a key is currently stored
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Public URL the companion read path serves `storage_key` from.
    fn public_url(&self, storage_key: &str) -> String;
}
