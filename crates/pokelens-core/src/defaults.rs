//! Centralized default constants for the pokelens system.
//!
//! **This module is the single source of truth** for all shared default
//! values. Crates reference these constants instead of defining their own
//! magic numbers. Every value here is environment-overridable through
//! [`crate::config::Settings`].

// =============================================================================
// UPLOAD
// =============================================================================

/// Maximum accepted upload size in bytes (10 MiB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// MIME types accepted for upload.
pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

// =============================================================================
// IMAGE PROCESSING
// =============================================================================

/// Minimum accepted width/height in pixels.
pub const MIN_DIMENSION: u32 = 32;

/// Maximum total pixel count after decode (4096x4096). Guards against
/// decompression bombs; enforced on decoded dimensions, not file size.
pub const MAX_PIXELS: u64 = 4096 * 4096;

/// Model input edge length in pixels (224x224).
pub const TARGET_SIZE: u32 = 224;

/// Per-channel standardization mean (ImageNet statistics).
pub const NORMALIZE_MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// Per-channel standardization std (ImageNet statistics).
pub const NORMALIZE_STD: [f32; 3] = [0.229, 0.224, 0.225];

// =============================================================================
// RECOGNITION
// =============================================================================

/// Minimum primary confidence before alternatives are attached.
pub const CONFIDENCE_THRESHOLD: f64 = 0.7;

// =============================================================================
// POKEAPI CLIENT
// =============================================================================

/// Base URL of the reference data API.
pub const POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Per-attempt request timeout in seconds.
pub const POKEAPI_TIMEOUT_SECS: u64 = 10;

/// Maximum retry attempts after the initial request.
pub const POKEAPI_MAX_RETRIES: u32 = 3;

/// Base retry delay in milliseconds (doubles per attempt).
pub const POKEAPI_RETRY_DELAY_MS: u64 = 1000;

/// Cache entry time-to-live in seconds (1 hour).
pub const CACHE_TTL_SECS: u64 = 3600;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;
