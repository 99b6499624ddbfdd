//! Default backend configs loaded strictly from environment variables.
//!
//! This module provides convenience constructors for [`LlmModelConfig`],
//! one per tier:
//!
//! - **Primary**  → the specialized chat model (mandatory)
//! - **Fallback** → a smaller general model tried when the primary probe fails
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND`         = provider kind (`ollama` or `huggingface`/`hf`/`tgi`)
//! - `LLM_TIMEOUT_SECS` = optional request timeout (u64)
//!
//! Ollama-specific:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (mandatory)
//!
//! HuggingFace-specific:
//! - `HF_URL`     = TGI endpoint (mandatory)
//! - `HF_API_KEY` = optional bearer token
//!
//! Models:
//! - `CHAT_MODEL`     = primary model identifier (mandatory)
//! - `FALLBACK_MODEL` = optional smaller fallback model

use std::str::FromStr;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{ConfigError, LlmError, env_opt_u64, must_env, validate_http_endpoint},
};

/// Resolves the provider kind from `LLM_KIND` (defaults to Ollama).
fn provider_kind() -> Result<LlmProvider, LlmError> {
    match std::env::var("LLM_KIND") {
        Ok(v) if !v.trim().is_empty() => Ok(LlmProvider::from_str(&v)?),
        _ => Ok(LlmProvider::Ollama),
    }
}

/// Resolves the backend endpoint strictly from environment.
///
/// Precedence for Ollama:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
///
/// For HuggingFace the endpoint is always `HF_URL`.
///
/// # Errors
///
/// - [`ConfigError::MissingVar`] if the endpoint variables are missing
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
/// - [`ConfigError::InvalidFormat`] if the endpoint lacks an http scheme
fn endpoint_for(provider: LlmProvider) -> Result<String, LlmError> {
    match provider {
        LlmProvider::Ollama => {
            if let Ok(url) = std::env::var("OLLAMA_URL") {
                if !url.trim().is_empty() {
                    validate_http_endpoint("OLLAMA_URL", url.trim())?;
                    return Ok(url);
                }
            }
            if let Ok(port) = std::env::var("OLLAMA_PORT") {
                if !port.trim().is_empty() {
                    let _ = port
                        .parse::<u16>()
                        .map_err(|_| ConfigError::InvalidNumber {
                            var: "OLLAMA_PORT",
                            reason: "expected u16 (1..=65535)",
                        })?;
                    return Ok(format!("http://localhost:{port}"));
                }
            }
            Err(LlmError::Config(ConfigError::MissingVar(
                "OLLAMA_URL or OLLAMA_PORT",
            )))
        }
        LlmProvider::HuggingFace => {
            let url = must_env("HF_URL")?;
            validate_http_endpoint("HF_URL", url.trim())?;
            Ok(url)
        }
    }
}

/// Constructs the **primary** backend config.
///
/// # Env
/// - `CHAT_MODEL` (required)
/// - `LLM_TIMEOUT_SECS` (optional; defaults to 120)
pub fn config_primary() -> Result<LlmModelConfig, LlmError> {
    let provider = provider_kind()?;
    let endpoint = endpoint_for(provider)?;
    let model = must_env("CHAT_MODEL")?;
    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.or(Some(120));

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key: api_key_for(provider),
        timeout_secs,
    })
}

/// Constructs the optional **fallback** backend config.
///
/// Same provider and endpoint as the primary, with the smaller model named
/// by `FALLBACK_MODEL`. Returns `Ok(None)` when no fallback is configured.
pub fn config_fallback() -> Result<Option<LlmModelConfig>, LlmError> {
    let model = match std::env::var("FALLBACK_MODEL") {
        Ok(v) if !v.trim().is_empty() => v,
        _ => return Ok(None),
    };

    let provider = provider_kind()?;
    let endpoint = endpoint_for(provider)?;
    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.or(Some(120));

    Ok(Some(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key: api_key_for(provider),
        timeout_secs,
    }))
}

fn api_key_for(provider: LlmProvider) -> Option<String> {
    match provider {
        LlmProvider::Ollama => None,
        LlmProvider::HuggingFace => std::env::var("HF_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty()),
    }
}
