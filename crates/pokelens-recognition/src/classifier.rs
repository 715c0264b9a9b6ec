//! Classifier trait and prediction types.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use pokelens_imaging::Tensor;

/// Errors produced by a classifier backend.
#[derive(Error, Debug)]
pub enum RecognitionError {
    /// `predict` was called before `load_model`.
    #[error("Model is not loaded")]
    ModelNotLoaded,

    /// Backend failed to produce predictions.
    #[error("Prediction failed: {0}")]
    Prediction(String),

    /// Upstream preprocessing failure.
    #[error(transparent)]
    Imaging(#[from] pokelens_imaging::ImagingError),
}

/// Normalized bounding box within the unit square.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One ranked classification result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub name: String,
    pub pokemon_id: i64,
    /// Self-reported certainty in [0, 1]; not a calibrated probability.
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

/// Model metadata for monitoring endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub name: String,
    pub version: String,
    pub model_type: String,
    pub input_shape: [usize; 3],
    pub num_classes: usize,
    pub confidence_threshold: f64,
}

/// A Pokémon classification backend.
///
/// One concrete implementation per model backend (mock today, a real model
/// later). Handlers depend only on this trait.
#[async_trait]
pub trait PokemonClassifier: Send + Sync {
    /// Load model weights. Must be called before `predict`.
    async fn load_model(&self) -> Result<(), RecognitionError>;

    /// Whether the model is ready for predictions.
    fn is_loaded(&self) -> bool;

    /// Rank candidate Pokémon for a preprocessed image.
    ///
    /// The returned list is sorted descending by confidence with the primary
    /// result first. Identical tensors always yield identical lists.
    async fn predict(&self, tensor: &Tensor) -> Result<Vec<Prediction>, RecognitionError>;

    /// Model metadata.
    fn model_info(&self) -> ModelInfo;
}
