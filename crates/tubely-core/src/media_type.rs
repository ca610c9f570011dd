//! Thumbnail media type classification.
//!
//! Only two declared content types are accepted for thumbnails: `image/jpeg` and
//! `image/png`. The comparison is made on the bare `type/subtype` token; parameters
//! (`image/png; charset=binary`), empty values and anything that is not a single
//! `type/subtype` pair are rejected with `AppError::UnsupportedMediaType`.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThumbnailMediaType {
    Jpeg,
    Png,
}

impl ThumbnailMediaType {
    pub const ALL: [ThumbnailMediaType; 2] = [ThumbnailMediaType::Jpeg, ThumbnailMediaType::Png];

    /// Classify a declared `Content-Type` value.
    pub fn from_content_type(content_type: &str) -> Result<Self, AppError> {
        let trimmed = content_type.trim();
        if trimmed.is_empty() {
            return Err(AppError::UnsupportedMediaType(
                "Missing content type. Allowed types: image/jpeg, image/png".to_string(),
            ));
        }

        Self::ALL
            .iter()
            .copied()
            .find(|media_type| trimmed.eq_ignore_ascii_case(media_type.mime()))
            .ok_or_else(|| {
                AppError::UnsupportedMediaType(format!(
                    "Invalid content type '{}'. Allowed types: image/jpeg, image/png",
                    trimmed
                ))
            })
    }

    /// Resolve a canonical file extension back to its media type.
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|media_type| media_type.extension() == extension)
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ThumbnailMediaType::Jpeg => "image/jpeg",
            ThumbnailMediaType::Png => "image/png",
        }
    }

    /// Canonical extension, the media subtype.
    pub fn extension(&self) -> &'static str {
        match self {
            ThumbnailMediaType::Jpeg => "jpeg",
            ThumbnailMediaType::Png => "png",
        }
    }
}

impl Display for ThumbnailMediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.mime())
    }
}
