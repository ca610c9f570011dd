//! Companion read path for stored thumbnails.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tubely_core::{AppError, ThumbnailMediaType};
use tubely_storage::keys::is_asset_key;
use tubely_storage::{StorageBackend, StoredAsset};
use uuid::Uuid;

use crate::error::HttpAppError;
use crate::state::AppState;

fn asset_response(asset: StoredAsset) -> Response {
    (
        [
            (header::CONTENT_TYPE, asset.content_type),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        asset.data,
    )
        .into_response()
}

fn not_found(what: &str) -> HttpAppError {
    HttpAppError(AppError::NotFound(format!("{} not found", what)))
}

/// `GET /assets/{file}`: serve a file written by the local store.
pub async fn get_asset(
    State(state): State<Arc<AppState>>,
    Path(file): Path<String>,
) -> Result<Response, HttpAppError> {
    if state.storage.backend_type() != StorageBackend::Local {
        return Err(not_found("Asset"));
    }

    let well_formed = file
        .split_once('.')
        .is_some_and(|(key, extension)| {
            is_asset_key(key) && ThumbnailMediaType::from_extension(extension).is_some()
        });
    if !well_formed {
        return Err(not_found("Asset"));
    }

    let asset = state.storage.get(&file).await?;
    Ok(asset_response(asset))
}

/// `GET /api/thumbnails/{video_id}`: serve a thumbnail held by the in-memory store.
pub async fn get_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
) -> Result<Response, HttpAppError> {
    let video_id = Uuid::parse_str(&video_id)
        .map_err(|_| AppError::BadRequest(format!("Invalid video ID '{}'", video_id)))?;

    if state.storage.backend_type() != StorageBackend::Memory {
        return Err(not_found("Thumbnail"));
    }

    let asset = state.storage.get(&video_id.to_string()).await?;
    Ok(asset_response(asset))
}
