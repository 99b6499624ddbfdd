//! Client library for a remote causal-LM generation backend.
//!
//! The crate exposes one service object, [`service::LlmService`], constructed
//! once at startup via a two-tier load (primary model, then a smaller
//! fallback model) and kept immutable for the lifetime of the process.
//! Providers are thin `reqwest` clients:
//!
//! - [`services::ollama_service::OllamaService`] — local Ollama runtime
//! - [`services::tgi_service::TgiService`] — HuggingFace text-generation-inference
//!
//! Decoding parameters live in [`config::decoding_config::DecodingConfig`],
//! a fixed record that is never derived from request input.

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod service;
pub mod services;
pub mod telemetry;

pub use config::decoding_config::DecodingConfig;
pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::LlmError;
pub use health_service::{HealthService, HealthStatus};
pub use service::{LlmService, ModelTier};
