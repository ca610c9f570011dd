use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::{header, HeaderMap},
    Json,
};
use tubely_core::{AppError, Video};
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::error::HttpAppError;
use crate::state::AppState;

fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

/// Upload thumbnail handler
///
/// Accepts a multipart form with a single `thumbnail` file part and attaches it
/// to the video identified by the path, which the caller must own.
///
/// # Returns
/// The updated `Video` (HTTP 200 OK)
///
/// # Errors
/// - `AppError::BadRequest` - Malformed video ID, multipart body or missing field
/// - `AppError::Unauthorized` - Missing or invalid bearer token
/// - `AppError::Forbidden` - Caller does not own the video
/// - `AppError::NotFound` - No such video
/// - `AppError::UnsupportedMediaType` - Thumbnail is not `image/jpeg` or `image/png`
/// - `AppError::PayloadTooLarge` - Body exceeds the configured bound
/// - `AppError::Storage` / `AppError::Internal` - Persisting or updating failed
#[tracing::instrument(
    skip(state, headers, multipart),
    fields(user_id = %user.user_id, operation = "upload_thumbnail")
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Path(video_id): Path<String>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Video>, HttpAppError> {
    let video_id = Uuid::parse_str(&video_id)
        .map_err(|_| AppError::BadRequest(format!("Invalid video ID '{}'", video_id)))?;

    let video = state
        .thumbnails
        .upload(video_id, user.user_id, content_length(&headers), multipart)
        .await?;

    Ok(Json(video))
}
