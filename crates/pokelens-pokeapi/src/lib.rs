//! # pokelens-pokeapi
//!
//! PokéAPI client with in-process TTL caching and resilient retry.
//!
//! Fetch semantics per logical lookup: cache hit returns immediately; on a
//! miss each attempt issues one GET. 404 is permanent (`NotFound`, never
//! retried); any other failure is transient and retried with exponential
//! backoff up to the configured budget, then surfaced as a single `Remote`
//! error carrying the last cause.

pub mod cache;
pub mod client;
pub mod models;

pub use cache::TtlCache;
pub use client::{CacheStats, PokeApiClient, PokeApiError};
pub use models::{Pokemon, PokemonSummary};
