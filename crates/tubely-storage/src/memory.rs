//! Process-lifetime in-memory thumbnail store.
//!
//! Entries are keyed by video ID and hold the bytes together with their media type,
//! so a second upload for the same video replaces the first one as a whole.
//! The map is split into shards to keep concurrent uploads for different videos
//! off the same lock.

use crate::traits::{Storage, StorageError, StorageResult, StoredAsset};
use crate::urls::UrlBuilder;
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

const DEFAULT_SHARDS: usize = 16;

#[derive(Clone)]
pub struct MemoryStorage {
    shards: Vec<Arc<RwLock<HashMap<String, StoredAsset>>>>,
    shard_count: usize,
    urls: UrlBuilder,
}

impl MemoryStorage {
    /// Create an empty store with the default shard count (16 shards)
    pub fn new(base_url: String) -> Self {
        Self::with_shards(base_url, DEFAULT_SHARDS)
    }

    /// Create an empty store with a custom shard count
    pub fn with_shards(base_url: String, shard_count: usize) -> Self {
        let shard_count = shard_count.max(1);
        let shards = (0..shard_count)
            .map(|_| Arc::new(RwLock::new(HashMap::new())))
            .collect();

        Self {
            shards,
            shard_count,
            urls: UrlBuilder::new(base_url),
        }
    }

    fn shard_index(&self, key: &str) -> usize {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() as usize) % self.shard_count
    }

    fn shard(&self, key: &str) -> &RwLock<HashMap<String, StoredAsset>> {
        &self.shards[self.shard_index(key)]
    }

    /// Number of stored thumbnails across all shards
    pub async fn len(&self) -> usize {
        let mut total = 0;
        for shard in &self.shards {
            total += shard.read().await.len();
        }
        total
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn validate_key(storage_key: &str) -> StorageResult<()> {
        if storage_key.trim().is_empty() {
            return Err(StorageError::InvalidKey(
                "Storage key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }

    fn thumbnail_key(&self, video_id: Uuid, _extension: &str) -> StorageResult<String> {
        Ok(video_id.to_string())
    }

    async fn put(&self, storage_key: &str, content_type: &str, data: Bytes) -> StorageResult<()> {
        Self::validate_key(storage_key)?;
        let size = data.len();

        let previous = self.shard(storage_key).write().await.insert(
            storage_key.to_string(),
            StoredAsset {
                data,
                content_type: content_type.to_string(),
            },
        );

        tracing::info!(
            key = %storage_key,
            content_type = %content_type,
            size_bytes = size,
            replaced = previous.is_some(),
            "Memory storage upload successful"
        );

        Ok(())
    }

    async fn get(&self, storage_key: &str) -> StorageResult<StoredAsset> {
        Self::validate_key(storage_key)?;
        self.shard(storage_key)
            .read()
            .await
            .get(storage_key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Self::validate_key(storage_key)?;
        Ok(self.shard(storage_key).read().await.contains_key(storage_key))
    }

    fn public_url(&self, storage_key: &str) -> String {
        self.urls.thumbnail_url(storage_key)
    }
}
