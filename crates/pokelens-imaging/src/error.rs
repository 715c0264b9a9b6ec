//! Upload and preprocessing error taxonomy.
//!
//! Each variant carries a stable string code surfaced verbatim in the HTTP
//! error payload.

use thiserror::Error;

/// Errors produced by the upload gate and image codec.
#[derive(Error, Debug)]
pub enum ImagingError {
    /// Declared or actual byte length exceeds the configured maximum.
    #[error("File size {size} bytes exceeds maximum allowed size of {max} bytes")]
    FileTooLarge { size: u64, max: u64 },

    /// Declared MIME type is not in the allow-list.
    #[error("File type '{content_type}' not supported. Allowed types: {allowed}")]
    UnsupportedType {
        content_type: String,
        allowed: String,
    },

    /// No filename present on the upload.
    #[error("No file provided or filename is empty")]
    MissingFile,

    /// Bytes do not parse as a supported image.
    #[error("Invalid or corrupted image file: {0}")]
    InvalidFormat(String),

    /// Decoded dimensions below the minimum.
    #[error("Image dimensions {width}x{height} are too small. Minimum size is {min}x{min} pixels")]
    TooSmall { width: u32, height: u32, min: u32 },

    /// Decoded dimensions above the pixel-count maximum.
    #[error("Image dimensions {width}x{height} are too large. Maximum is {max_pixels} pixels")]
    TooLarge {
        width: u32,
        height: u32,
        max_pixels: u64,
    },

    /// Resize/normalize stage failed.
    #[error("Failed to preprocess image: {0}")]
    Preprocessing(String),
}

impl ImagingError {
    /// Stable machine-readable code for the API error payload.
    pub fn code(&self) -> &'static str {
        match self {
            ImagingError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            ImagingError::UnsupportedType { .. } => "INVALID_FILE_TYPE",
            ImagingError::MissingFile => "NO_FILE_PROVIDED",
            ImagingError::InvalidFormat(_) => "INVALID_IMAGE_FORMAT",
            ImagingError::TooSmall { .. } => "IMAGE_TOO_SMALL",
            ImagingError::TooLarge { .. } => "IMAGE_TOO_LARGE",
            ImagingError::Preprocessing(_) => "PREPROCESSING_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(
            ImagingError::FileTooLarge { size: 1, max: 0 }.code(),
            "FILE_TOO_LARGE"
        );
        assert_eq!(
            ImagingError::UnsupportedType {
                content_type: "image/gif".into(),
                allowed: "image/png".into()
            }
            .code(),
            "INVALID_FILE_TYPE"
        );
        assert_eq!(ImagingError::MissingFile.code(), "NO_FILE_PROVIDED");
        assert_eq!(
            ImagingError::InvalidFormat("x".into()).code(),
            "INVALID_IMAGE_FORMAT"
        );
        assert_eq!(
            ImagingError::TooSmall {
                width: 16,
                height: 16,
                min: 32
            }
            .code(),
            "IMAGE_TOO_SMALL"
        );
        assert_eq!(
            ImagingError::TooLarge {
                width: 8192,
                height: 8192,
                max_pixels: 16_777_216
            }
            .code(),
            "IMAGE_TOO_LARGE"
        );
        assert_eq!(
            ImagingError::Preprocessing("x".into()).code(),
            "PREPROCESSING_ERROR"
        );
    }

    #[test]
    fn test_display_includes_limits() {
        let err = ImagingError::FileTooLarge {
            size: 11_000_000,
            max: 10_485_760,
        };
        let msg = err.to_string();
        assert!(msg.contains("11000000"));
        assert!(msg.contains("10485760"));
    }
}
