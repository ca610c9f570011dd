//! Shared constants for the HTTP layer.

/// Multipart field that carries the thumbnail file.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// `iss` claim of access tokens accepted by the API.
pub const ACCESS_TOKEN_ISSUER: &str = "tubely-access";

/// Thumbnail upload route; `{video_id}` is the owning video.
pub const UPLOAD_THUMBNAIL_ROUTE: &str = "/api/thumbnail_upload/{video_id}";

pub const HEALTH_ROUTE: &str = "/health";
