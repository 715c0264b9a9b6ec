//! # pokelens-core
//!
//! Core types, defaults, and configuration for the pokelens service.
//!
//! This crate provides the default constants, settings loader, logging
//! field schema, and shared API response envelope that the other pokelens
//! crates depend on. Error types live with the subsystems that raise them.

pub mod api;
pub mod config;
pub mod defaults;
pub mod logging;

// Re-export commonly used types at crate root
pub use api::{ApiErrorBody, ApiResponse};
pub use config::Settings;
