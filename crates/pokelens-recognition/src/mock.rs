//! Mock classifier with deterministic, content-seeded output.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::classifier::{
    BoundingBox, ModelInfo, PokemonClassifier, Prediction, RecognitionError,
};
use pokelens_core::defaults;
use pokelens_imaging::Tensor;

/// Roster the mock draws predictions from: (Pokédex id, name).
const ROSTER: &[(i64, &str)] = &[
    (25, "pikachu"),
    (1, "bulbasaur"),
    (4, "charmander"),
    (7, "squirtle"),
    (150, "mewtwo"),
    (6, "charizard"),
    (9, "blastoise"),
    (3, "venusaur"),
    (144, "articuno"),
    (145, "zapdos"),
    (146, "moltres"),
    (151, "mew"),
    (39, "jigglypuff"),
    (104, "cubone"),
    (143, "snorlax"),
    (94, "gengar"),
    (130, "gyarados"),
    (149, "dragonite"),
    (59, "arcanine"),
    (65, "alakazam"),
];

pub const MODEL_VERSION: &str = "mock-v1.0.0";

/// Deterministic stand-in classifier.
///
/// Predictions are pseudo-random but seeded from a numeric reduction of the
/// tensor, so identical image content always produces the same ranked list.
/// Two different images may coincidentally collide; that is acceptable for a
/// mock.
pub struct MockClassifier {
    confidence_threshold: f64,
    prediction_delay: Duration,
    loaded: AtomicBool,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self {
            confidence_threshold: defaults::CONFIDENCE_THRESHOLD,
            prediction_delay: Duration::from_millis(100),
            loaded: AtomicBool::new(false),
        }
    }

    /// Set the threshold below which alternatives are attached.
    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the simulated inference latency (zero for tests).
    pub fn with_prediction_delay(mut self, delay: Duration) -> Self {
        self.prediction_delay = delay;
        self
    }

    fn seed_from(tensor: &Tensor) -> u64 {
        (tensor.sum() * 1000.0) as u64 % 1_000_000
    }

    fn mock_bounding_box(rng: &mut StdRng) -> BoundingBox {
        // Subjects typically fill most of the frame.
        let x = rng.gen_range(0.1..0.3);
        let y = rng.gen_range(0.1..0.3);
        let width = rng.gen_range(0.4..0.8f64).min(1.0 - x);
        let height = rng.gen_range(0.4..0.8f64).min(1.0 - y);
        BoundingBox {
            x,
            y,
            width,
            height,
        }
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PokemonClassifier for MockClassifier {
    async fn load_model(&self) -> Result<(), RecognitionError> {
        // Simulated weight loading.
        tokio::time::sleep(Duration::from_millis(100)).await;
        self.loaded.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    async fn predict(&self, tensor: &Tensor) -> Result<Vec<Prediction>, RecognitionError> {
        if !self.is_loaded() {
            return Err(RecognitionError::ModelNotLoaded);
        }

        if self.prediction_delay > Duration::ZERO {
            tokio::time::sleep(self.prediction_delay).await;
        }

        let seed = Self::seed_from(tensor);
        let mut rng = StdRng::seed_from_u64(seed);
        debug!(seed, "Generating mock predictions");

        let (primary_id, primary_name) = ROSTER[rng.gen_range(0..ROSTER.len())];
        // Biased toward plausible mid-to-high certainty.
        let base_confidence = rng.gen_range(0.3..0.95);

        let mut predictions = vec![Prediction {
            name: primary_name.to_string(),
            pokemon_id: primary_id,
            confidence: base_confidence,
            bounding_box: Some(Self::mock_bounding_box(&mut rng)),
        }];

        if base_confidence < self.confidence_threshold {
            let num_alternatives = rng.gen_range(2..=4usize);
            let mut used_ids = vec![primary_id];

            for _ in 0..num_alternatives {
                let available: Vec<_> = ROSTER
                    .iter()
                    .filter(|(id, _)| !used_ids.contains(id))
                    .collect();
                if available.is_empty() {
                    break;
                }
                let (alt_id, alt_name) = *available[rng.gen_range(0..available.len())];
                used_ids.push(alt_id);

                // Strictly below the primary.
                let alt_confidence = rng.gen_range(0.1..base_confidence - 0.05);
                predictions.push(Prediction {
                    name: alt_name.to_string(),
                    pokemon_id: alt_id,
                    confidence: alt_confidence,
                    bounding_box: Some(Self::mock_bounding_box(&mut rng)),
                });
            }
        }

        predictions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        Ok(predictions)
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            name: "Mock Pokemon Classifier".to_string(),
            version: MODEL_VERSION.to_string(),
            model_type: "mock".to_string(),
            input_shape: [3, defaults::TARGET_SIZE as usize, defaults::TARGET_SIZE as usize],
            num_classes: ROSTER.len(),
            confidence_threshold: self.confidence_threshold,
        }
    }
}
