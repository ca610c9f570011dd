//! Application services used by the HTTP handlers.

pub mod thumbnail_upload;
