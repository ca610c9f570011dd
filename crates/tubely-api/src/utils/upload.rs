//! Multipart helpers for the thumbnail upload handler

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::{Bytes, BytesMut};
use tubely_core::AppError;

use crate::constants::THUMBNAIL_FIELD;

/// The thumbnail part of an upload, read fully into memory.
#[derive(Debug, Clone)]
pub struct ThumbnailFile {
    /// Declared part content type; empty when the part carried none.
    pub content_type: String,
    pub data: Bytes,
}

fn too_large(max_size: usize) -> AppError {
    AppError::PayloadTooLarge(format!(
        "Upload exceeds maximum allowed size of {} bytes",
        max_size
    ))
}

/// Reject a request whose declared `Content-Length` already exceeds the bound.
pub fn check_declared_length(content_length: Option<u64>, max_size: usize) -> Result<(), AppError> {
    match content_length {
        Some(length) if length > max_size as u64 => Err(too_large(max_size)),
        _ => Ok(()),
    }
}

/// Map a multipart read failure; body-limit hits become `PayloadTooLarge`.
pub fn multipart_error(err: MultipartError, max_size: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large(max_size)
    } else {
        AppError::BadRequest(format!("Failed to read multipart body: {}", err.body_text()))
    }
}

pub fn multipart_rejection(rejection: MultipartRejection) -> AppError {
    AppError::BadRequest(format!("Invalid multipart request: {}", rejection.body_text()))
}

/// Extract the single `thumbnail` file part from a multipart form.
///
/// Other fields are skipped. A second `thumbnail` part, a missing one, or an empty
/// one is a `BadRequest`. The part is read chunk by chunk and abandoned as soon as
/// it grows past `max_size`.
pub async fn extract_thumbnail_field(
    mut multipart: Multipart,
    max_size: usize,
) -> Result<ThumbnailFile, AppError> {
    let mut thumbnail: Option<ThumbnailFile> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_size))?
    {
        if field.name() != Some(THUMBNAIL_FIELD) {
            continue;
        }

        if thumbnail.is_some() {
            return Err(AppError::BadRequest(format!(
                "Multiple '{}' fields are not allowed",
                THUMBNAIL_FIELD
            )));
        }

        let content_type = field.content_type().map(str::to_string).unwrap_or_default();

        let mut data = BytesMut::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(e, max_size))?
        {
            if data.len() + chunk.len() > max_size {
                return Err(too_large(max_size));
            }
            data.extend_from_slice(&chunk);
        }

        thumbnail = Some(ThumbnailFile {
            content_type,
            data: data.freeze(),
        });
    }

    let thumbnail = thumbnail.ok_or_else(|| {
        AppError::BadRequest(format!("Missing '{}' file field", THUMBNAIL_FIELD))
    })?;

    if thumbnail.data.is_empty() {
        return Err(AppError::BadRequest("Thumbnail file is empty".to_string()));
    }

    Ok(thumbnail)
}
