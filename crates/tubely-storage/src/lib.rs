//! Tubely Storage Library
//!
//! This crate provides the thumbnail storage abstraction and its two implementations:
//! a local filesystem store and a process-lifetime in-memory store.
//!
//! # Storage key format
//!
//! - **Local**: `{random}.{extension}` where `{random}` is 32 bytes from the OS random
//!   source encoded as unpadded URL-safe base64 (43 characters). See `keys`.
//! - **Memory**: the owning video's ID, hyphenated. A new upload replaces the previous one.
//!
//! Public URLs are built by `urls::UrlBuilder` from the configured origin.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-memory")]
pub mod memory;
pub mod traits;
pub mod urls;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-memory")]
pub use memory::MemoryStorage;
pub use traits::{Storage, StorageError, StorageResult, StoredAsset};
pub use tubely_core::StorageBackend;
pub use urls::UrlBuilder;
