//! Upload gate: size/type/presence rules enforced before expensive decoding.

use std::io::Cursor;

use image::{DynamicImage, ImageReader};
use tracing::{debug, warn};

use crate::error::ImagingError;
use pokelens_core::defaults;

/// Metadata declared by the client for one uploaded file.
///
/// None of these values are trusted: the byte stream is re-validated after
/// reading. Created per request, discarded with the response.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub content_type: String,
    pub declared_size: Option<u64>,
}

/// Color mode of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Rgb,
    Rgba,
    Grayscale,
    Other,
}

/// A successfully decoded image. Invariant: width >= 1 and height >= 1.
#[derive(Debug)]
pub struct DecodedImage {
    image: DynamicImage,
    format: Option<image::ImageFormat>,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn color_mode(&self) -> ColorMode {
        use image::ColorType;
        match self.image.color() {
            ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => ColorMode::Rgb,
            ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => ColorMode::Rgba,
            ColorType::L8 | ColorType::L16 => ColorMode::Grayscale,
            _ => ColorMode::Other,
        }
    }

    /// Detected container format as a short name ("png", "jpeg", ...).
    pub fn format_name(&self) -> &'static str {
        match self.format {
            Some(f) => f.to_mime_type().strip_prefix("image/").unwrap_or("unknown"),
            None => "unknown",
        }
    }

    /// "WxH" string for response payloads.
    pub fn dimensions(&self) -> String {
        format!("{}x{}", self.width(), self.height())
    }

    pub(crate) fn inner(&self) -> &DynamicImage {
        &self.image
    }

    #[cfg(test)]
    pub(crate) fn from_dynamic(image: DynamicImage) -> Self {
        Self {
            image,
            format: None,
        }
    }
}

/// Upload acceptance rules.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_file_size: u64,
    pub allowed_mime_types: Vec<String>,
    pub min_dimension: u32,
    pub max_pixels: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size: defaults::MAX_FILE_SIZE,
            allowed_mime_types: defaults::ALLOWED_MIME_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            min_dimension: defaults::MIN_DIMENSION,
            max_pixels: defaults::MAX_PIXELS,
        }
    }
}

impl UploadPolicy {
    /// Advisory checks against client-declared metadata.
    ///
    /// Declared size and MIME type come from the client and can lie; callers
    /// MUST follow up with [`decode_and_validate`](Self::decode_and_validate)
    /// on the actual bytes.
    pub fn validate_metadata(&self, file: &UploadedFile) -> Result<(), ImagingError> {
        if let Some(size) = file.declared_size {
            if size > self.max_file_size {
                return Err(ImagingError::FileTooLarge {
                    size,
                    max: self.max_file_size,
                });
            }
        }

        if !self
            .allowed_mime_types
            .iter()
            .any(|t| t == &file.content_type)
        {
            return Err(ImagingError::UnsupportedType {
                content_type: file.content_type.clone(),
                allowed: self.allowed_mime_types.join(", "),
            });
        }

        if file.filename.as_deref().map_or(true, |f| f.is_empty()) {
            return Err(ImagingError::MissingFile);
        }

        debug!(
            filename = file.filename.as_deref().unwrap_or(""),
            content_type = %file.content_type,
            size_bytes = file.declared_size,
            "File metadata validation passed"
        );
        Ok(())
    }

    /// Authoritative checks on the actual bytes, then decode.
    ///
    /// Re-checks the byte length (the declared size may have lied), probes
    /// the header for dimensions before materializing pixels so the
    /// pixel-count bound guards against decompression bombs, then decodes.
    pub fn decode_and_validate(&self, bytes: &[u8]) -> Result<DecodedImage, ImagingError> {
        let size = bytes.len() as u64;
        if size > self.max_file_size {
            return Err(ImagingError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| ImagingError::InvalidFormat(e.to_string()))?;
        let format = reader.format();
        if format.is_none() {
            return Err(ImagingError::InvalidFormat(
                "unrecognized image format".to_string(),
            ));
        }

        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| ImagingError::InvalidFormat(e.to_string()))?;

        if width < self.min_dimension || height < self.min_dimension {
            warn!(width, height, "Rejecting undersized image");
            return Err(ImagingError::TooSmall {
                width,
                height,
                min: self.min_dimension,
            });
        }

        if u64::from(width) * u64::from(height) > self.max_pixels {
            warn!(width, height, "Rejecting oversized image");
            return Err(ImagingError::TooLarge {
                width,
                height,
                max_pixels: self.max_pixels,
            });
        }

        let image = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| ImagingError::InvalidFormat(e.to_string()))?
            .decode()
            .map_err(|e| ImagingError::InvalidFormat(e.to_string()))?;

        debug!(
            width,
            height,
            format = ?format,
            size_bytes = size,
            "Image decoded and validated"
        );

        Ok(DecodedImage { image, format })
    }
}
