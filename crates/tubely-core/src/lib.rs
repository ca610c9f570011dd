//! Tubely Core Library
//!
//! This crate provides the domain model, error types, configuration and media type
//! classification shared by the storage, database and API crates.

pub mod config;
pub mod error;
pub mod media_type;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{AppConfig, BaseConfig, Config};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use media_type::ThumbnailMediaType;
pub use models::Video;
pub use storage_types::StorageBackend;
