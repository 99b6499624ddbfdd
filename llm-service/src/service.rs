//! Shared generation service with a two-tier primary/fallback load.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once via [`LlmService::load`], wrap in `Arc`, and pass clones
//!   to dependents. The service is read-only after construction; requests
//!   never mutate it.
//! - At load time the primary config is health-probed; if it fails, the
//!   fallback config (a smaller model) is probed instead. If both fail, the
//!   load returns an error and the process must not start serving chat.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use llm_service::config::decoding_config::DecodingConfig;
//! use llm_service::config::llm_model_config::LlmModelConfig;
//! use llm_service::config::llm_provider::LlmProvider;
//! use llm_service::service::LlmService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let primary = LlmModelConfig {
//!         provider: LlmProvider::Ollama,
//!         model: "womens-health-chatbot".into(),
//!         endpoint: "http://localhost:11434".into(),
//!         api_key: None,
//!         timeout_secs: Some(120),
//!     };
//!
//!     let svc = Arc::new(
//!         LlmService::load(primary, None, DecodingConfig::default(), Some(10)).await?,
//!     );
//!
//!     let txt = svc.generate("USER: Hi\nDOCTOR:").await?;
//!     println!("{txt}");
//!     Ok(())
//! }
//! ```

use tracing::{info, warn};

use crate::config::decoding_config::DecodingConfig;
use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::LlmError;
use crate::health_service::{HealthService, HealthStatus};
use crate::services::{ollama_service::OllamaService, tgi_service::TgiService};

/// Which configured tier the service ended up running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// The specialized chat model.
    Primary,
    /// The smaller general model used when the primary probe failed.
    Fallback,
}

/// Provider client constructed for the active config.
enum ProviderClient {
    Ollama(OllamaService),
    HuggingFace(TgiService),
}

/// Immutable generation service bound to one backend config.
///
/// Holds the active [`LlmModelConfig`], the constant [`DecodingConfig`], the
/// provider client, and a reusable [`HealthService`] for liveness snapshots.
pub struct LlmService {
    active: LlmModelConfig,
    decoding: DecodingConfig,
    tier: ModelTier,
    client: ProviderClient,
    health: HealthService,
}

impl LlmService {
    /// Loads the service, probing the primary config first and falling back
    /// to the secondary config when the primary is unreachable.
    ///
    /// # Arguments
    /// - `primary`: required primary backend config.
    /// - `fallback_opt`: optional smaller model tried when the primary fails.
    /// - `decoding`: the fixed sampling parameters; validated here.
    /// - `health_timeout_secs`: optional timeout for the health checker.
    ///
    /// # Errors
    /// - [`LlmError::Config`] if the decoding config is invalid
    /// - [`LlmError::Unavailable`] if no tier passes its probe
    pub async fn load(
        primary: LlmModelConfig,
        fallback_opt: Option<LlmModelConfig>,
        decoding: DecodingConfig,
        health_timeout_secs: Option<u64>,
    ) -> Result<Self, LlmError> {
        decoding.validate()?;
        let health = HealthService::new(health_timeout_secs)?;

        let primary_status = health.check(&primary).await;
        if primary_status.ok {
            info!(model = %primary.model, "primary backend passed startup probe");
            return Self::with_active(primary, decoding, ModelTier::Primary, health);
        }

        warn!(
            model = %primary.model,
            message = %primary_status.message,
            "primary backend failed startup probe; trying fallback"
        );

        let Some(fallback) = fallback_opt else {
            return Err(LlmError::Unavailable {
                primary: primary_status.message,
                fallback: "not configured".into(),
            });
        };

        let fallback_status = health.check(&fallback).await;
        if fallback_status.ok {
            info!(model = %fallback.model, "fallback backend passed startup probe");
            return Self::with_active(fallback, decoding, ModelTier::Fallback, health);
        }

        Err(LlmError::Unavailable {
            primary: primary_status.message,
            fallback: fallback_status.message,
        })
    }

    /// Generates text through the active backend with the fixed decoding
    /// parameters. One call per invocation; no retry.
    ///
    /// # Errors
    /// Returns [`LlmError`] if the backend call fails.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        match &self.client {
            ProviderClient::Ollama(cli) => cli.generate(prompt).await,
            ProviderClient::HuggingFace(cli) => cli.generate(prompt).await,
        }
    }

    /// Returns a resilient health snapshot for the active config.
    pub async fn health(&self) -> HealthStatus {
        self.health.check(&self.active).await
    }

    /// The config the service is actually running on.
    pub fn active_config(&self) -> &LlmModelConfig {
        &self.active
    }

    /// The fixed decoding parameters.
    pub fn decoding(&self) -> &DecodingConfig {
        &self.decoding
    }

    /// Which tier the startup load settled on.
    pub fn tier(&self) -> ModelTier {
        self.tier
    }

    /* --------------------- Internals --------------------- */

    fn with_active(
        active: LlmModelConfig,
        decoding: DecodingConfig,
        tier: ModelTier,
        health: HealthService,
    ) -> Result<Self, LlmError> {
        let client = match active.provider {
            LlmProvider::Ollama => {
                ProviderClient::Ollama(OllamaService::new(active.clone(), decoding.clone())?)
            }
            LlmProvider::HuggingFace => {
                ProviderClient::HuggingFace(TgiService::new(active.clone(), decoding.clone())?)
            }
        };

        Ok(Self {
            active,
            decoding,
            tier,
            client,
            health,
        })
    }
}
