//! Application settings loaded from the environment.
//!
//! Every field falls back to the constants in [`crate::defaults`]. Variables
//! use the `POKELENS_` prefix; malformed values fall back silently (the same
//! parse-with-default posture the rest of the stack takes for env knobs).

use crate::defaults;

/// Runtime configuration for the pokelens service.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Deployment environment label ("development", "staging", "production").
    pub environment: String,
    /// Maximum accepted upload size in bytes.
    pub max_file_size: u64,
    /// MIME types accepted for upload.
    pub allowed_mime_types: Vec<String>,
    /// Model input edge length in pixels.
    pub target_size: u32,
    /// Minimum primary confidence before alternatives are attached.
    pub confidence_threshold: f64,
    /// Base URL of the reference data API.
    pub pokeapi_base_url: String,
    /// Per-attempt request timeout in seconds.
    pub pokeapi_timeout_secs: u64,
    /// Maximum retry attempts after the initial request.
    pub pokeapi_max_retries: u32,
    /// Base retry delay in milliseconds.
    pub pokeapi_retry_delay_ms: u64,
    /// Cache entry time-to-live in seconds.
    pub cache_ttl_secs: u64,
    /// HTTP bind host.
    pub host: String,
    /// HTTP server port.
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            max_file_size: defaults::MAX_FILE_SIZE,
            allowed_mime_types: defaults::ALLOWED_MIME_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            target_size: defaults::TARGET_SIZE,
            confidence_threshold: defaults::CONFIDENCE_THRESHOLD,
            pokeapi_base_url: defaults::POKEAPI_BASE_URL.to_string(),
            pokeapi_timeout_secs: defaults::POKEAPI_TIMEOUT_SECS,
            pokeapi_max_retries: defaults::POKEAPI_MAX_RETRIES,
            pokeapi_retry_delay_ms: defaults::POKEAPI_RETRY_DELAY_MS,
            cache_ttl_secs: defaults::CACHE_TTL_SECS,
            host: defaults::SERVER_HOST.to_string(),
            port: defaults::SERVER_PORT,
        }
    }
}

impl Settings {
    /// Load settings from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let base = Self::default();
        Self {
            environment: env_string("POKELENS_ENVIRONMENT", base.environment),
            max_file_size: env_parse("POKELENS_MAX_FILE_SIZE", base.max_file_size),
            allowed_mime_types: env_list("POKELENS_ALLOWED_MIME_TYPES", base.allowed_mime_types),
            target_size: env_parse("POKELENS_TARGET_SIZE", base.target_size),
            confidence_threshold: env_parse(
                "POKELENS_CONFIDENCE_THRESHOLD",
                base.confidence_threshold,
            ),
            pokeapi_base_url: env_string("POKELENS_POKEAPI_URL", base.pokeapi_base_url),
            pokeapi_timeout_secs: env_parse(
                "POKELENS_POKEAPI_TIMEOUT_SECS",
                base.pokeapi_timeout_secs,
            ),
            pokeapi_max_retries: env_parse(
                "POKELENS_POKEAPI_MAX_RETRIES",
                base.pokeapi_max_retries,
            ),
            pokeapi_retry_delay_ms: env_parse(
                "POKELENS_POKEAPI_RETRY_DELAY_MS",
                base.pokeapi_retry_delay_ms,
            ),
            cache_ttl_secs: env_parse("POKELENS_CACHE_TTL_SECS", base.cache_ttl_secs),
            host: env_string("POKELENS_HOST", base.host),
            port: env_parse("POKELENS_PORT", base.port),
        }
    }
}

fn env_string(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_list(key: &str, default: Vec<String>) -> Vec<String> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert_eq!(s.max_file_size, 10 * 1024 * 1024);
        assert_eq!(s.target_size, 224);
        assert_eq!(s.confidence_threshold, 0.7);
        assert_eq!(s.pokeapi_max_retries, 3);
        assert_eq!(s.cache_ttl_secs, 3600);
        assert_eq!(s.allowed_mime_types.len(), 3);
    }

    #[test]
    fn test_env_override() {
        // Use a key unique to this test to avoid cross-test env races.
        std::env::set_var("POKELENS_TEST_PARSE", "42");
        assert_eq!(env_parse("POKELENS_TEST_PARSE", 7u32), 42);
        std::env::set_var("POKELENS_TEST_PARSE", "not-a-number");
        assert_eq!(env_parse("POKELENS_TEST_PARSE", 7u32), 7);
        std::env::remove_var("POKELENS_TEST_PARSE");
    }

    #[test]
    fn test_env_list_parsing() {
        std::env::set_var("POKELENS_TEST_LIST", "image/png, image/jpeg");
        let parsed = env_list("POKELENS_TEST_LIST", vec![]);
        assert_eq!(parsed, vec!["image/png", "image/jpeg"]);
        std::env::remove_var("POKELENS_TEST_LIST");
    }

    #[test]
    fn test_env_list_empty_falls_back() {
        std::env::set_var("POKELENS_TEST_LIST_EMPTY", "  ");
        let parsed = env_list("POKELENS_TEST_LIST_EMPTY", vec!["a".to_string()]);
        assert_eq!(parsed, vec!["a"]);
        std::env::remove_var("POKELENS_TEST_LIST_EMPTY");
    }
}
