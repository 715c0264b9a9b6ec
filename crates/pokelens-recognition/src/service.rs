//! Preprocessing plus classification behind one call.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::classifier::{ModelInfo, PokemonClassifier, Prediction, RecognitionError};
use pokelens_imaging::{content_hash, DecodedImage, Preprocessor};

/// Outcome of identifying one uploaded image.
#[derive(Debug, Clone, Serialize)]
pub struct Identification {
    pub primary: Prediction,
    pub alternatives: Vec<Prediction>,
    pub processing_time_ms: u64,
    pub model_version: String,
    /// SHA-256 of the raw upload, for dedup and log correlation.
    pub image_hash: String,
}

/// Classifier readiness, exposed by the models endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub status: String,
    pub is_loaded: bool,
    pub model_info: ModelInfo,
}

/// Ties a [`Preprocessor`] to a classifier backend.
///
/// Built once in `main` and shared behind an `Arc`; handlers never touch
/// the classifier directly.
pub struct RecognitionService {
    preprocessor: Preprocessor,
    classifier: Box<dyn PokemonClassifier>,
}

impl RecognitionService {
    pub fn new(preprocessor: Preprocessor, classifier: Box<dyn PokemonClassifier>) -> Self {
        Self {
            preprocessor,
            classifier,
        }
    }

    /// Load the model if it is not ready yet. Idempotent.
    pub async fn initialize(&self) -> Result<(), RecognitionError> {
        if self.classifier.is_loaded() {
            return Ok(());
        }
        let info = self.classifier.model_info();
        info!(model = %info.name, version = %info.version, "Loading model");
        self.classifier.load_model().await
    }

    /// Run the full pipeline on an already decoded image.
    ///
    /// `raw` must be the exact bytes the image was decoded from; the hash in
    /// the result is computed over them.
    pub async fn identify(
        &self,
        image: &DecodedImage,
        raw: &[u8],
    ) -> Result<Identification, RecognitionError> {
        let started = Instant::now();

        let image_hash = content_hash(raw);
        let tensor = self.preprocessor.preprocess(image)?;
        debug!(image_hash = %image_hash, "Image preprocessed");

        let mut predictions = self.classifier.predict(&tensor).await?;
        if predictions.is_empty() {
            return Err(RecognitionError::Prediction(
                "classifier returned no predictions".to_string(),
            ));
        }

        let primary = predictions.remove(0);
        let identification = Identification {
            primary,
            alternatives: predictions,
            processing_time_ms: started.elapsed().as_millis() as u64,
            model_version: self.classifier.model_info().version,
            image_hash,
        };

        info!(
            pokemon = %identification.primary.name,
            confidence = identification.primary.confidence,
            duration_ms = identification.processing_time_ms,
            "Identification complete"
        );
        Ok(identification)
    }

    pub fn model_status(&self) -> ModelStatus {
        let is_loaded = self.classifier.is_loaded();
        ModelStatus {
            status: if is_loaded { "ready" } else { "not_loaded" }.to_string(),
            is_loaded,
            model_info: self.classifier.model_info(),
        }
    }
}
