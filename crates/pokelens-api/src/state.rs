//! Shared application state, assembled once at startup.

use std::sync::Arc;
use std::time::{Duration, Instant};

use pokelens_core::Settings;
use pokelens_imaging::{Normalization, Preprocessor, UploadPolicy};
use pokelens_pokeapi::PokeApiClient;
use pokelens_recognition::{MockClassifier, RecognitionService};

/// Everything handlers need, injected through axum state. No globals.
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub policy: UploadPolicy,
    pub recognition: Arc<RecognitionService>,
    pub pokeapi: Arc<PokeApiClient>,
    pub started_at: Instant,
}

impl AppState {
    /// Wire the production component set from settings.
    pub fn new(settings: Settings) -> Self {
        let policy = UploadPolicy {
            max_file_size: settings.max_file_size,
            allowed_mime_types: settings.allowed_mime_types.clone(),
            ..UploadPolicy::default()
        };

        let recognition = RecognitionService::new(
            Preprocessor::new(settings.target_size, Normalization::UnitInterval),
            Box::new(MockClassifier::new().with_confidence_threshold(settings.confidence_threshold)),
        );
        let pokeapi = PokeApiClient::from_settings(&settings);

        Self {
            settings,
            policy,
            recognition: Arc::new(recognition),
            pokeapi: Arc::new(pokeapi),
            started_at: Instant::now(),
        }
    }

    /// State wired for tests: instant mock inference and a caller-supplied
    /// reference-data endpoint.
    pub fn for_tests(mut settings: Settings) -> Self {
        settings.pokeapi_retry_delay_ms = 5;
        let mut state = Self::new(settings.clone());
        state.recognition = Arc::new(RecognitionService::new(
            Preprocessor::new(settings.target_size, Normalization::UnitInterval),
            Box::new(
                MockClassifier::new()
                    .with_confidence_threshold(settings.confidence_threshold)
                    .with_prediction_delay(Duration::ZERO),
            ),
        ));
        state
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
