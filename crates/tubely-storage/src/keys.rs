//! Random asset key generation for the local store.
//!
//! A key is 32 bytes from the operating system's random source, encoded as unpadded
//! URL-safe base64. The encoded form is always 43 characters drawn from
//! `[A-Za-z0-9_-]`, so it is safe both as a filename and as a URL path segment.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::traits::{StorageError, StorageResult};

/// Number of random bytes behind every asset key.
pub const ASSET_KEY_BYTES: usize = 32;

/// Length of an encoded asset key.
pub const ASSET_KEY_LEN: usize = 43;

/// Generate a fresh asset key.
///
/// Fails with `StorageError::KeyGeneration` when the OS random source is unavailable.
pub fn generate_asset_key() -> StorageResult<String> {
    let mut buf = [0u8; ASSET_KEY_BYTES];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| StorageError::KeyGeneration(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(buf))
}

/// Whether `key` has the shape produced by `generate_asset_key`.
pub fn is_asset_key(key: &str) -> bool {
    key.len() == ASSET_KEY_LEN
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
