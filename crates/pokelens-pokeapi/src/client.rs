//! PokéAPI client with caching and resilient retry.

use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::cache::TtlCache;
use crate::models::{Pokemon, PokemonSummary};
use pokelens_core::{defaults, Settings};

/// Errors produced by the PokéAPI client.
#[derive(Error, Debug)]
pub enum PokeApiError {
    /// Caller bug: non-positive id or empty name. Raised before any I/O,
    /// never retried.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The resource does not exist (HTTP 404). Permanent, never retried.
    #[error("Pokemon not found at {0}")]
    NotFound(String),

    /// All retry attempts exhausted on transient failures.
    #[error("Failed to fetch {url} after {attempts} attempts: {cause}")]
    Remote {
        url: String,
        attempts: u32,
        cause: String,
    },
}

/// Cache introspection snapshot.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub pokemon_by_id: usize,
    pub pokemon_by_name: usize,
}

/// Outcome of a single HTTP attempt.
enum AttemptError {
    NotFound,
    Transient(String),
}

const ID_KEY_PREFIX: &str = "pokemon_id_";
const NAME_KEY_PREFIX: &str = "pokemon_name_";

/// PokéAPI client with a shared TTL cache and exponential-backoff retry.
pub struct PokeApiClient {
    client: Client,
    base_url: String,
    max_retries: u32,
    retry_delay: Duration,
    cache: TtlCache,
}

impl PokeApiClient {
    /// Create a client with default settings.
    pub fn new() -> Self {
        Self::with_config(
            defaults::POKEAPI_BASE_URL.to_string(),
            Duration::from_secs(defaults::POKEAPI_TIMEOUT_SECS),
            defaults::POKEAPI_MAX_RETRIES,
            Duration::from_millis(defaults::POKEAPI_RETRY_DELAY_MS),
            Duration::from_secs(defaults::CACHE_TTL_SECS),
        )
    }

    /// Create a client with explicit configuration.
    pub fn with_config(
        base_url: String,
        timeout: Duration,
        max_retries: u32,
        retry_delay: Duration,
        cache_ttl: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("pokelens/0.1")
            .build()
            .expect("Failed to create HTTP client");

        info!(
            base_url = %base_url,
            timeout_secs = timeout.as_secs(),
            max_retries,
            cache_ttl_secs = cache_ttl.as_secs(),
            "Initializing PokéAPI client"
        );

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries,
            retry_delay,
            cache: TtlCache::new(cache_ttl),
        }
    }

    /// Create a client from loaded settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_config(
            settings.pokeapi_base_url.clone(),
            Duration::from_secs(settings.pokeapi_timeout_secs),
            settings.pokeapi_max_retries,
            Duration::from_millis(settings.pokeapi_retry_delay_ms),
            Duration::from_secs(settings.cache_ttl_secs),
        )
    }

    /// Fetch a Pokémon by Pokédex number.
    #[instrument(skip(self), fields(subsystem = "pokeapi", op = "get_by_id"))]
    pub async fn get_by_id(&self, id: i64) -> Result<Pokemon, PokeApiError> {
        if id <= 0 {
            return Err(PokeApiError::InvalidArgument(
                "Pokemon ID must be positive".to_string(),
            ));
        }

        let cache_key = format!("{}{}", ID_KEY_PREFIX, id);
        if let Some(pokemon) = self.cached(&cache_key) {
            debug!(id, "Cache hit");
            return Ok(pokemon);
        }

        let url = format!("{}/pokemon/{}", self.base_url, id);
        let value = self.fetch_with_retry(&url).await?;
        let pokemon = self.store(value)?;
        info!(id, "Fetched Pokemon data");
        Ok(pokemon)
    }

    /// Fetch a Pokémon by name (case-insensitive, surrounding whitespace
    /// ignored).
    #[instrument(skip(self), fields(subsystem = "pokeapi", op = "get_by_name"))]
    pub async fn get_by_name(&self, name: &str) -> Result<Pokemon, PokeApiError> {
        let normalized = name.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(PokeApiError::InvalidArgument(
                "Pokemon name cannot be empty".to_string(),
            ));
        }

        let cache_key = format!("{}{}", NAME_KEY_PREFIX, normalized);
        if let Some(pokemon) = self.cached(&cache_key) {
            debug!(name = %normalized, "Cache hit");
            return Ok(pokemon);
        }

        let url = format!("{}/pokemon/{}", self.base_url, normalized);
        let value = self.fetch_with_retry(&url).await?;
        let pokemon = self.store(value)?;
        info!(name = %normalized, "Fetched Pokemon data");
        Ok(pokemon)
    }

    /// Simplified record by Pokédex number.
    pub async fn summary_by_id(&self, id: i64) -> Result<PokemonSummary, PokeApiError> {
        Ok(PokemonSummary::from_pokemon(&self.get_by_id(id).await?))
    }

    /// Simplified record by name.
    pub async fn summary_by_name(&self, name: &str) -> Result<PokemonSummary, PokeApiError> {
        Ok(PokemonSummary::from_pokemon(&self.get_by_name(name).await?))
    }

    /// Cache introspection; no side effects.
    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.cache.len(),
            pokemon_by_id: self.cache.count_prefix(ID_KEY_PREFIX),
            pokemon_by_name: self.cache.count_prefix(NAME_KEY_PREFIX),
        }
    }

    /// Drop all cached entries immediately.
    pub fn clear_cache(&self) {
        self.cache.clear();
        info!("Pokemon data cache cleared");
    }

    /// Look up and deserialize a cached record. A payload that no longer
    /// deserializes is dropped and treated as a miss.
    fn cached(&self, key: &str) -> Option<Pokemon> {
        let value = self.cache.get(key)?;
        match serde_json::from_value::<Pokemon>(value) {
            Ok(p) => Some(p.normalized()),
            Err(e) => {
                warn!(key, error = %e, "Dropping undeserializable cache entry");
                self.cache.remove(key);
                None
            }
        }
    }

    /// Cache a fetched payload under both id and name keys, then return the
    /// typed record.
    fn store(&self, value: serde_json::Value) -> Result<Pokemon, PokeApiError> {
        let pokemon = serde_json::from_value::<Pokemon>(value.clone())
            .map_err(|e| PokeApiError::Remote {
                url: self.base_url.clone(),
                attempts: 1,
                cause: format!("response did not match the Pokemon schema: {}", e),
            })?
            .normalized();

        self.cache
            .insert(format!("{}{}", ID_KEY_PREFIX, pokemon.id), value.clone());
        self.cache
            .insert(format!("{}{}", NAME_KEY_PREFIX, pokemon.name), value);
        Ok(pokemon)
    }

    /// Issue GET attempts with exponential backoff.
    ///
    /// 404 fails immediately; any other status, transport error, timeout, or
    /// JSON parse failure is transient. Backoff is `retry_delay * 2^n`.
    async fn fetch_with_retry(&self, url: &str) -> Result<serde_json::Value, PokeApiError> {
        let attempts = self.max_retries + 1;
        let mut last_cause = String::new();

        for attempt in 0..attempts {
            let start = Instant::now();
            match self.attempt(url).await {
                Ok(value) => {
                    debug!(
                        attempt = attempt + 1,
                        duration_ms = start.elapsed().as_millis() as u64,
                        "PokéAPI request succeeded"
                    );
                    return Ok(value);
                }
                Err(AttemptError::NotFound) => {
                    return Err(PokeApiError::NotFound(url.to_string()));
                }
                Err(AttemptError::Transient(cause)) => {
                    warn!(attempt = attempt + 1, error = %cause, "PokéAPI request failed");
                    last_cause = cause;
                }
            }

            if attempt < self.max_retries {
                let backoff = self.retry_delay * 2u32.pow(attempt);
                tokio::time::sleep(backoff).await;
            }
        }

        Err(PokeApiError::Remote {
            url: url.to_string(),
            attempts,
            cause: last_cause,
        })
    }

    async fn attempt(&self, url: &str) -> Result<serde_json::Value, AttemptError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AttemptError::Transient(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(AttemptError::NotFound),
            status if status.is_success() => response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| AttemptError::Transient(format!("JSON decode error: {}", e))),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AttemptError::Transient(format!(
                    "PokéAPI returned {}: {}",
                    status, body
                )))
            }
        }
    }
}

impl Default for PokeApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let client = PokeApiClient::new();
        assert_eq!(client.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(client.max_retries, 3);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = PokeApiClient::with_config(
            "http://localhost:9000/".to_string(),
            Duration::from_secs(1),
            0,
            Duration::from_millis(1),
            Duration::from_secs(1),
        );
        assert_eq!(client.base_url, "http://localhost:9000");
    }

    #[tokio::test]
    async fn test_invalid_id_fails_fast() {
        let client = PokeApiClient::new();
        assert!(matches!(
            client.get_by_id(-1).await,
            Err(PokeApiError::InvalidArgument(_))
        ));
        assert!(matches!(
            client.get_by_id(0).await,
            Err(PokeApiError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_name_fails_fast() {
        let client = PokeApiClient::new();
        assert!(matches!(
            client.get_by_name("").await,
            Err(PokeApiError::InvalidArgument(_))
        ));
        assert!(matches!(
            client.get_by_name("   ").await,
            Err(PokeApiError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_cache_stats_empty() {
        let client = PokeApiClient::new();
        let stats = client.cache_stats();
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.pokemon_by_id, 0);
        assert_eq!(stats.pokemon_by_name, 0);
    }

    #[test]
    fn test_store_populates_both_keys() {
        let client = PokeApiClient::new();
        let pokemon = client
            .store(serde_json::json!({"id": 25, "name": " Pikachu"}))
            .unwrap();
        assert_eq!(pokemon.name, "pikachu");

        let stats = client.cache_stats();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.pokemon_by_id, 1);
        assert_eq!(stats.pokemon_by_name, 1);
    }

    #[test]
    fn test_clear_cache() {
        let client = PokeApiClient::new();
        client
            .store(serde_json::json!({"id": 1, "name": "bulbasaur"}))
            .unwrap();
        client.clear_cache();
        assert_eq!(client.cache_stats().total_entries, 0);
    }
}
