//! Image preprocessing: resize, color conversion, normalization.
//!
//! One pinned pipeline: convert to RGB (alpha dropped), aspect-preserving
//! center-crop fit to the target size (Lanczos3), scale to f32, apply the
//! configured normalization, emit a channel-first tensor. A `Preprocessor`
//! carries exactly one normalization policy; policies are never mixed within
//! a pipeline instance.

use image::imageops::FilterType;
use tracing::debug;

use crate::error::ImagingError;
use crate::upload::DecodedImage;
use pokelens_core::defaults;

/// Pixel intensity normalization policy.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalization {
    /// Scale to [0, 1].
    UnitInterval,
    /// Scale to [0, 1], then per-channel `(v - mean) / std`.
    /// Output range is no longer [0, 1].
    Standardized { mean: [f32; 3], std: [f32; 3] },
}

impl Normalization {
    /// ImageNet-statistics standardization.
    pub fn imagenet() -> Self {
        Normalization::Standardized {
            mean: defaults::NORMALIZE_MEAN,
            std: defaults::NORMALIZE_STD,
        }
    }
}

/// Normalized pixel data in channel-first layout.
///
/// Shape is always `[1, C, H, W]`; produced once per request and discarded
/// with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    data: Vec<f32>,
    shape: [usize; 4],
}

impl Tensor {
    pub fn shape(&self) -> [usize; 4] {
        self.shape
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Sum of all elements. Used as a deterministic content reduction.
    pub fn sum(&self) -> f64 {
        self.data.iter().map(|&v| f64::from(v)).sum()
    }
}

/// Converts a decoded image into a model-input tensor.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    target_size: u32,
    normalization: Normalization,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self {
            target_size: defaults::TARGET_SIZE,
            normalization: Normalization::UnitInterval,
        }
    }
}

impl Preprocessor {
    pub fn new(target_size: u32, normalization: Normalization) -> Self {
        Self {
            target_size,
            normalization,
        }
    }

    pub fn target_size(&self) -> u32 {
        self.target_size
    }

    pub fn normalization(&self) -> &Normalization {
        &self.normalization
    }

    /// Produce a `[1, 3, target, target]` tensor from a decoded image.
    ///
    /// Resizing policy: aspect-ratio-preserving center-crop-to-fill
    /// (`resize_to_fill`, Lanczos3). RGBA alpha is dropped; grayscale and
    /// palette images are expanded to RGB.
    pub fn preprocess(&self, image: &DecodedImage) -> Result<Tensor, ImagingError> {
        if self.target_size == 0 {
            return Err(ImagingError::Preprocessing(
                "target size must be non-zero".to_string(),
            ));
        }

        let target = self.target_size;
        let rgb = image
            .inner()
            .resize_to_fill(target, target, FilterType::Lanczos3)
            .to_rgb8();

        let (w, h) = (target as usize, target as usize);
        let mut data = vec![0.0f32; 3 * h * w];

        for (x, y, pixel) in rgb.enumerate_pixels() {
            let (x, y) = (x as usize, y as usize);
            for c in 0..3 {
                let mut v = f32::from(pixel[c]) / 255.0;
                if let Normalization::Standardized { mean, std } = &self.normalization {
                    v = (v - mean[c]) / std[c];
                }
                data[c * h * w + y * w + x] = v;
            }
        }

        debug!(
            target,
            normalization = ?self.normalization,
            "Image preprocessing completed"
        );

        Ok(Tensor {
            data,
            shape: [1, 3, h, w],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::DecodedImage;
    use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

    fn solid_rgb(width: u32, height: u32, color: [u8; 3]) -> DecodedImage {
        DecodedImage::from_dynamic(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            Rgb(color),
        )))
    }

    #[test]
    fn test_output_shape() {
        let tensor = Preprocessor::default()
            .preprocess(&solid_rgb(640, 480, [10, 20, 30]))
            .unwrap();
        assert_eq!(tensor.shape(), [1, 3, 224, 224]);
        assert_eq!(tensor.data().len(), 3 * 224 * 224);
    }

    #[test]
    fn test_unit_interval_range() {
        let tensor = Preprocessor::default()
            .preprocess(&solid_rgb(64, 64, [0, 128, 255]))
            .unwrap();
        assert!(tensor.data().iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_channel_first_layout() {
        // Constant color: channel planes must each be uniform at the
        // channel's scaled intensity.
        let tensor = Preprocessor::default()
            .preprocess(&solid_rgb(64, 64, [255, 0, 128]))
            .unwrap();
        let plane = 224 * 224;
        let data = tensor.data();
        assert!(data[..plane].iter().all(|&v| (v - 1.0).abs() < 1e-4));
        assert!(data[plane..2 * plane].iter().all(|&v| v.abs() < 1e-4));
        assert!(data[2 * plane..]
            .iter()
            .all(|&v| (v - 128.0 / 255.0).abs() < 1e-2));
    }

    #[test]
    fn test_standardized_values() {
        let pre = Preprocessor::new(224, Normalization::imagenet());
        let tensor = pre.preprocess(&solid_rgb(64, 64, [255, 255, 255])).unwrap();
        // White pixel, red channel: (1.0 - 0.485) / 0.229
        let expected = (1.0 - 0.485) / 0.229;
        assert!((tensor.data()[0] - expected).abs() < 1e-3);
        // Standardized output legitimately exceeds [0, 1].
        assert!(tensor.data()[0] > 1.0);
    }

    #[test]
    fn test_rgba_alpha_dropped() {
        let img = RgbaImage::from_pixel(64, 64, Rgba([200, 100, 50, 10]));
        let decoded = DecodedImage::from_dynamic(DynamicImage::ImageRgba8(img));
        let tensor = Preprocessor::default().preprocess(&decoded).unwrap();
        assert_eq!(tensor.shape(), [1, 3, 224, 224]);
        // Alpha is dropped, not premultiplied: red plane keeps 200/255.
        assert!((tensor.data()[0] - 200.0 / 255.0).abs() < 1e-2);
    }

    #[test]
    fn test_grayscale_expanded() {
        let img = image::GrayImage::from_pixel(48, 48, image::Luma([77]));
        let decoded = DecodedImage::from_dynamic(DynamicImage::ImageLuma8(img));
        let tensor = Preprocessor::default().preprocess(&decoded).unwrap();
        assert_eq!(tensor.shape(), [1, 3, 224, 224]);
        let plane = 224 * 224;
        let expected = 77.0 / 255.0;
        // All three channels carry the replicated gray value.
        for c in 0..3 {
            assert!((tensor.data()[c * plane] - expected).abs() < 1e-2);
        }
    }

    #[test]
    fn test_deterministic() {
        let img = solid_rgb(100, 60, [3, 141, 59]);
        let a = Preprocessor::default().preprocess(&img).unwrap();
        let b = Preprocessor::default().preprocess(&img).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_target_rejected() {
        let pre = Preprocessor::new(0, Normalization::UnitInterval);
        let err = pre.preprocess(&solid_rgb(64, 64, [1, 2, 3])).unwrap_err();
        assert_eq!(err.code(), "PREPROCESSING_ERROR");
    }

    #[test]
    fn test_tensor_sum_tracks_content() {
        let dark = Preprocessor::default()
            .preprocess(&solid_rgb(64, 64, [0, 0, 0]))
            .unwrap();
        let bright = Preprocessor::default()
            .preprocess(&solid_rgb(64, 64, [255, 255, 255]))
            .unwrap();
        assert!(dark.sum() < bright.sum());
    }
}
