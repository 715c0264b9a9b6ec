//! Content hashing and size formatting helpers.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of the exact input bytes.
///
/// Used as a cache/dedup key, not a security control. Stable across calls
/// and process restarts for identical bytes.
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Human-readable size with 1024-based units.
///
/// No decimal for bytes, one decimal for KB/MB: "512 B", "3.2 KB", "1.5 MB".
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}
