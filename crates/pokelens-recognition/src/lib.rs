//! # pokelens-recognition
//!
//! Pokémon classifier abstraction and the mock backend.
//!
//! Request handlers depend only on the [`PokemonClassifier`] trait; one
//! concrete type exists per model backend. The mock backend produces
//! pseudo-random but deterministic output seeded from image content, so
//! identical uploads always yield identical ranked predictions.

pub mod classifier;
pub mod mock;
pub mod service;

pub use classifier::{
    BoundingBox, ModelInfo, PokemonClassifier, Prediction, RecognitionError,
};
pub use mock::MockClassifier;
pub use service::{Identification, ModelStatus, RecognitionService};
