use crate::keys::generate_asset_key;
use crate::traits::{Storage, StorageError, StorageResult, StoredAsset};
use crate::urls::UrlBuilder;
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tubely_core::ThumbnailMediaType;
use uuid::Uuid;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Local filesystem storage implementation
///
/// Every thumbnail is a single flat file directly under the assets root, named
/// `{random key}.{extension}`.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    urls: UrlBuilder,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Assets root directory (e.g., "./assets"), created if missing
    /// * `base_url` - Server origin used for public URLs (e.g., "http://localhost:8091")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            urls: UrlBuilder::new(base_url),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Convert storage key to filesystem path with security validation
    ///
    /// Keys are flat filenames, so any separator or parent reference is rejected
    /// before the key is joined onto the assets root.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.is_empty()
            || storage_key.contains("..")
            || storage_key.contains('/')
            || storage_key.contains('\\')
        {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(storage_key))
    }

    fn content_type_for(storage_key: &str) -> &'static str {
        Path::new(storage_key)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ThumbnailMediaType::from_extension)
            .map(|media_type| media_type.mime())
            .unwrap_or(FALLBACK_CONTENT_TYPE)
    }
}

/// Remove a file left behind by a failed write.
async fn discard_partial(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to remove partially written asset"
            );
        }
    }
}

#[async_trait]
impl Storage for LocalStorage {
    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }

    fn thumbnail_key(&self, _video_id: Uuid, extension: &str) -> StorageResult<String> {
        let key = generate_asset_key()?;
        Ok(format!("{}.{}", key, extension))
    }

    async fn put(&self, storage_key: &str, _content_type: &str, data: Bytes) -> StorageResult<()> {
        let path = self.key_to_path(storage_key)?;
        let size = data.len();

        let start = std::time::Instant::now();

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .await
            .map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        if let Err(e) = file.write_all(&data).await {
            discard_partial(&path).await;
            return Err(StorageError::UploadFailed(format!(
                "Failed to write file {}: {}",
                path.display(),
                e
            )));
        }

        if let Err(e) = file.sync_all().await {
            discard_partial(&path).await;
            return Err(StorageError::UploadFailed(format!(
                "Failed to sync file {}: {}",
                path.display(),
                e
            )));
        }

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }

    async fn get(&self, storage_key: &str) -> StorageResult<StoredAsset> {
        let path = self.key_to_path(storage_key)?;
        let start = std::time::Instant::now();

        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(storage_key.to_string()));
            }
            Err(e) => {
                return Err(StorageError::DownloadFailed(format!(
                    "Failed to read file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        tracing::debug!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        Ok(StoredAsset {
            data: Bytes::from(data),
            content_type: Self::content_type_for(storage_key).to_string(),
        })
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(storage_key)?;
        Ok(fs::try_exists(&path).await?)
    }

    fn public_url(&self, storage_key: &str) -> String {
        self.urls.asset_url(storage_key)
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use crate::keys::ASSET_KEY_LEN;
    use tempfile::tempdir;

    async fn storage_in(dir: &Path) -> LocalStorage {
        LocalStorage::new(dir, "http://localhost:8091".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_local_storage_put_get() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        let key = storage.thumbnail_key(Uuid::new_v4(), "png").unwrap();
        assert_eq!(key.len(), ASSET_KEY_LEN + ".png".len());
        assert!(key.ends_with(".png"));

        let data = Bytes::from_static(b"\x89PNG\r\n\x1a\nfake");
        storage.put(&key, "image/png", data.clone()).await.unwrap();

        let asset = storage.get(&key).await.unwrap();
        assert_eq!(asset.data, data);
        assert_eq!(asset.content_type, "image/png");
        assert!(storage.exists(&key).await.unwrap());

        let on_disk = std::fs::read(dir.path().join(&key)).unwrap();
        assert_eq!(on_disk, data.to_vec());
    }

    #[tokio::test]
    async fn test_public_url_points_at_assets() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;
        assert_eq!(
            storage.public_url("abc.jpeg"),
            "http://localhost:8091/assets/abc.jpeg"
        );
    }

    #[tokio::test]
    async fn test_keys_differ_for_same_video() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;
        let video_id = Uuid::new_v4();
        let first = storage.thumbnail_key(video_id, "jpeg").unwrap();
        let second = storage.thumbnail_key(video_id, "jpeg").unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_put_replaces_existing_content() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        storage
            .put("same.jpeg", "image/jpeg", Bytes::from_static(b"first, longer content"))
            .await
            .unwrap();
        storage
            .put("same.jpeg", "image/jpeg", Bytes::from_static(b"second"))
            .await
            .unwrap();

        let asset = storage.get("same.jpeg").await.unwrap();
        assert_eq!(asset.data, Bytes::from_static(b"second"));
    }

    #[tokio::test]
    async fn test_missing_key_is_not_found() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        let err = storage.get("missing.png").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
        assert!(!storage.exists("missing.png").await.unwrap());
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        for key in ["", "../escape.png", "nested/file.png", "..\\escape.png"] {
            let err = storage
                .put(key, "image/png", Bytes::from_static(b"x"))
                .await
                .unwrap_err();
            assert!(matches!(err, StorageError::InvalidKey(_)), "{:?}", key);
        }
    }

    #[tokio::test]
    async fn test_new_creates_missing_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("assets").join("thumbs");
        let storage = storage_in(&root).await;
        assert!(root.is_dir());
        assert_eq!(storage.base_path(), root.as_path());
    }

    #[tokio::test]
    async fn test_discard_partial_removes_leftover_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.png");
        std::fs::write(&path, b"half").unwrap();

        discard_partial(&path).await;
        assert!(!path.exists());

        // Already gone is fine.
        discard_partial(&path).await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_put_into_removed_root_fails() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("assets");
        let storage = storage_in(&root).await;
        std::fs::remove_dir_all(&root).unwrap();

        let err = storage
            .put("k.png", "image/png", Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::UploadFailed(_)));
    }
}
