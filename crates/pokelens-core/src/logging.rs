//! Structured logging field name constants for pokelens.
//!
//! All crates use these constants for consistent structured logging fields
//! so log aggregation tools can query by the same names across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue (validation rejection, retryable failure) |
//! | INFO  | Lifecycle events, request completions |
//! | DEBUG | Decision points, cache hits/misses, intermediate values |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID for one HTTP request. Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "imaging", "pokeapi", "recognition"
pub const SUBSYSTEM: &str = "subsystem";

/// Logical operation name.
/// Examples: "identify", "get_by_id", "preprocess", "predict"
pub const OPERATION: &str = "op";

// ─── Upload fields ─────────────────────────────────────────────────────────

/// Uploaded file name.
pub const FILENAME: &str = "filename";

/// Declared MIME type of the upload.
pub const CONTENT_TYPE: &str = "content_type";

/// Byte length of the upload.
pub const SIZE_BYTES: &str = "size_bytes";

/// SHA-256 content hash (full 64-char hex).
pub const IMAGE_HASH: &str = "image_hash";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Retry attempt number (1-based).
pub const ATTEMPT: &str = "attempt";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Stable error code surfaced in the API payload.
pub const ERROR_CODE: &str = "error_code";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
