//! # farmhub-adapter-http-reqwest
//!
//! REST adapter reaching the farmhub backend with [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement `RuleGateway`, `DeviceGateway` and `FarmGateway` from `farmhub-app::ports`
//! - Attach the session's bearer token; refuse to send requests without one
//! - Unwrap `{ "data": … }` envelopes and surface backend error messages
//! - Load the backend location and timeout from `farmhub.toml` / environment
//!
//! ## Dependency rule
//! Depends on `farmhub-app` (for port traits) and `farmhub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod client;
pub mod config;
pub mod error;

pub use client::ApiClient;
pub use config::{ApiConfig, ConfigError};
pub use error::HttpError;
