//! Tubely API Library
//!
//! This crate provides the HTTP API handlers, middleware, and application setup
//! for thumbnail uploads.

// Module declarations
pub mod constants;
mod handlers;
pub mod services;
pub mod setup;
mod telemetry;
pub mod utils;

// Public modules
pub mod auth;
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::thumbnail_upload::{ThumbnailUploadService, UploadStage};
pub use state::AppState;
