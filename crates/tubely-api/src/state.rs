//! Application state shared by all handlers.

use crate::services::thumbnail_upload::ThumbnailUploadService;
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoStore;
use tubely_storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub thumbnails: ThumbnailUploadService,
}

impl AppState {
    pub fn new(config: Config, videos: Arc<dyn VideoStore>, storage: Arc<dyn Storage>) -> Self {
        let thumbnails = ThumbnailUploadService::new(
            videos,
            storage.clone(),
            config.max_upload_size_bytes(),
        );

        Self {
            storage,
            thumbnails,
        }
    }
}
