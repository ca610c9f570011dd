//! Public URL construction for stored thumbnails.

/// Path prefix the local store's files are served under.
pub const ASSETS_PATH: &str = "/assets";

/// Path prefix the in-memory store's thumbnails are served under.
pub const THUMBNAILS_PATH: &str = "/api/thumbnails";

/// Builds absolute URLs from the configured server origin.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base_url: String,
}

impl UrlBuilder {
    /// `base_url` is the server origin, e.g. `http://localhost:8091`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `{base}/assets/{file}` where `file` is `{key}.{ext}`.
    pub fn asset_url(&self, file: &str) -> String {
        format!("{}{}/{}", self.base_url, ASSETS_PATH, file)
    }

    /// `{base}/api/thumbnails/{video_id}`
    pub fn thumbnail_url(&self, video_id: &str) -> String {
        format!("{}{}/{}", self.base_url, THUMBNAILS_PATH, video_id)
    }
}
