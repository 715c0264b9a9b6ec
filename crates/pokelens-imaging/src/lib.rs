//! # pokelens-imaging
//!
//! Upload validation and image preprocessing for pokelens.
//!
//! The pipeline runs strictly in order: validate declared metadata, read the
//! bytes once, re-validate against actual content, decode, hash, preprocess.
//! Metadata checks are advisory (client-declared values lie); the post-read
//! checks are authoritative.

pub mod codec;
pub mod error;
pub mod hash;
pub mod upload;

pub use codec::{Normalization, Preprocessor, Tensor};
pub use error::ImagingError;
pub use hash::{content_hash, format_size};
pub use upload::{ColorMode, DecodedImage, UploadPolicy, UploadedFile};
