//! Thumbnail upload orchestration
//!
//! An upload moves through `Authorizing → Parsing → Validating → Generating →
//! Persisting → Updating → Done`. The first failing stage ends the request; nothing is
//! retried. The video record is only written once the bytes are durably stored, so a
//! record never points at a missing asset. The reverse can happen: if the record update
//! fails after persisting, the stored asset is left unreferenced and is reported in the
//! logs.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::Multipart;
use tubely_core::{AppError, ThumbnailMediaType, Video};
use tubely_db::VideoStore;
use tubely_storage::Storage;
use uuid::Uuid;

use crate::utils::upload::{
    check_declared_length, extract_thumbnail_field, multipart_rejection, ThumbnailFile,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    Authorizing,
    Parsing,
    Validating,
    Generating,
    Persisting,
    Updating,
    Done,
}

impl Display for UploadStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            UploadStage::Authorizing => "authorizing",
            UploadStage::Parsing => "parsing",
            UploadStage::Validating => "validating",
            UploadStage::Generating => "generating",
            UploadStage::Persisting => "persisting",
            UploadStage::Updating => "updating",
            UploadStage::Done => "done",
        };
        f.write_str(name)
    }
}

fn enter(stage: UploadStage, video_id: Uuid) {
    tracing::debug!(stage = %stage, video_id = %video_id, "Thumbnail upload stage");
}

fn failed<E: Into<AppError>>(stage: UploadStage) -> impl FnOnce(E) -> AppError {
    move |err| {
        let err = err.into();
        tracing::debug!(stage = %stage, error = %err, "Thumbnail upload failed");
        err
    }
}

#[derive(Clone)]
pub struct ThumbnailUploadService {
    videos: Arc<dyn VideoStore>,
    storage: Arc<dyn Storage>,
    max_upload_size: usize,
}

impl ThumbnailUploadService {
    pub fn new(
        videos: Arc<dyn VideoStore>,
        storage: Arc<dyn Storage>,
        max_upload_size: usize,
    ) -> Self {
        Self {
            videos,
            storage,
            max_upload_size,
        }
    }

    /// Run a full upload for `video_id` on behalf of `user_id`.
    #[tracing::instrument(
        skip(self, multipart),
        fields(backend = %self.storage.backend_type())
    )]
    pub async fn upload(
        &self,
        video_id: Uuid,
        user_id: Uuid,
        content_length: Option<u64>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Video, AppError> {
        let video = self.authorize(video_id, user_id).await?;

        enter(UploadStage::Parsing, video_id);
        check_declared_length(content_length, self.max_upload_size)
            .map_err(failed(UploadStage::Parsing))?;
        let multipart = multipart
            .map_err(multipart_rejection)
            .map_err(failed(UploadStage::Parsing))?;
        let file = extract_thumbnail_field(multipart, self.max_upload_size)
            .await
            .map_err(failed(UploadStage::Parsing))?;

        self.store(video, file).await
    }

    /// Load the video and check that `user_id` owns it.
    pub async fn authorize(&self, video_id: Uuid, user_id: Uuid) -> Result<Video, AppError> {
        enter(UploadStage::Authorizing, video_id);

        let video = self
            .videos
            .get_video(video_id)
            .await
            .map_err(failed(UploadStage::Authorizing))?
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))
            .map_err(failed(UploadStage::Authorizing))?;

        if !video.is_owned_by(user_id) {
            return Err(failed(UploadStage::Authorizing)(AppError::Forbidden(
                "You are not the owner of this video".to_string(),
            )));
        }

        Ok(video)
    }

    /// Validate, persist and reference an already-parsed thumbnail.
    pub async fn store(&self, mut video: Video, file: ThumbnailFile) -> Result<Video, AppError> {
        enter(UploadStage::Validating, video.id);
        let media_type = ThumbnailMediaType::from_content_type(&file.content_type)
            .map_err(failed(UploadStage::Validating))?;

        enter(UploadStage::Generating, video.id);
        let key = self
            .storage
            .thumbnail_key(video.id, media_type.extension())
            .map_err(failed(UploadStage::Generating))?;

        enter(UploadStage::Persisting, video.id);
        let size_bytes = file.data.len();
        self.storage
            .put(&key, media_type.mime(), file.data)
            .await
            .map_err(failed(UploadStage::Persisting))?;

        enter(UploadStage::Updating, video.id);
        video.thumbnail_url = Some(self.storage.public_url(&key));
        let video = match self.videos.update_video(&video).await {
            Ok(video) => video,
            Err(err) => {
                tracing::warn!(
                    video_id = %video.id,
                    key = %key,
                    error = %err,
                    "Thumbnail stored but video record update failed; asset is orphaned"
                );
                return Err(failed(UploadStage::Updating)(AppError::Internal(format!(
                    "Failed to update video {}: {}",
                    video.id, err
                ))));
            }
        };

        enter(UploadStage::Done, video.id);
        tracing::info!(
            video_id = %video.id,
            key = %key,
            media_type = %media_type,
            size_bytes,
            "Thumbnail uploaded"
        );

        Ok(video)
    }
}
