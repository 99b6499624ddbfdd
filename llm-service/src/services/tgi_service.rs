//! HuggingFace text-generation-inference (TGI) service.
//!
//! Minimal, synchronous (non-streaming) client around the TGI REST API:
//! - `POST {endpoint}/generate` — single generation call
//!
//! Constructor validation:
//! - `cfg.provider` must be [`LlmProvider::HuggingFace`]
//! - `cfg.endpoint` must start with http:// or https://
//!
//! The request asks for the full text back (prompt included) because the
//! caller extracts the answer after the dialogue marker itself. Special
//! tokens are stripped by the server.

use std::time::Duration;

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::decoding_config::DecodingConfig;
use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{
    HttpError, LlmError, ProviderError, ProviderErrorKind, make_snippet,
};

/// Thin client for a TGI server hosting the chat model.
pub struct TgiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    decoding: DecodingConfig,
    url_generate: String,
}

impl TgiService {
    /// Creates a new [`TgiService`] from the given configs.
    ///
    /// Builds an HTTP client with default headers (bearer auth when an API
    /// key is configured) and a configurable timeout.
    ///
    /// # Errors
    /// - [`ProviderErrorKind::InvalidProvider`] if `cfg.provider` is not HuggingFace
    /// - [`ProviderErrorKind::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`LlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig, decoding: DecodingConfig) -> Result<Self, LlmError> {
        if cfg.provider != LlmProvider::HuggingFace {
            return Err(ProviderError::new(
                LlmProvider::HuggingFace,
                ProviderErrorKind::InvalidProvider,
            )
            .into());
        }

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                LlmProvider::HuggingFace,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(key) = cfg.api_key.as_deref() {
            let value =
                header::HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| {
                    ProviderError::new(
                        LlmProvider::HuggingFace,
                        ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
                    )
                })?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(120));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_generate = format!("{}/generate", base);

        Ok(Self {
            client,
            cfg,
            decoding,
            url_generate,
        })
    }

    /// Performs a single **non-streaming** generation request via `/generate`.
    ///
    /// Mapped parameters from [`DecodingConfig`]:
    /// - `max_new_tokens`     ← `max_new_tokens`
    /// - `temperature`        ← `temperature`
    /// - `top_p`              ← `top_p`
    /// - `top_k`              ← `top_k`
    /// - `repetition_penalty` ← `repetition_penalty`
    /// - `truncate`           ← `max_input_tokens` (input-side truncation)
    /// - `do_sample`          ← always true (stochastic sampling, no seed)
    ///
    /// TGI has no knob for `min_new_tokens` or `no_repeat_ngram`; those
    /// fields stay in the config record but are not sent.
    ///
    /// # Errors
    /// - [`ProviderErrorKind::HttpStatus`] for non-2xx responses
    /// - [`LlmError::HttpTransport`] for client/network failures
    /// - [`ProviderErrorKind::Decode`] if the JSON cannot be parsed
    /// - [`ProviderErrorKind::EmptyGeneration`] if no text comes back
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let body = GenerateRequest {
            inputs: prompt,
            parameters: GenerateParameters {
                max_new_tokens: self.decoding.max_new_tokens,
                temperature: self.decoding.temperature,
                top_p: self.decoding.top_p,
                top_k: self.decoding.top_k,
                repetition_penalty: self.decoding.repetition_penalty,
                truncate: self.decoding.max_input_tokens,
                do_sample: true,
                return_full_text: true,
            },
        };

        debug!("POST {}", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::new(
                LlmProvider::HuggingFace,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet: make_snippet(&text),
                }),
            )
            .into());
        }

        let out: GenerateResponse = resp.json().await.map_err(|e| {
            ProviderError::new(
                LlmProvider::HuggingFace,
                ProviderErrorKind::Decode(format!("serde error: {e}")),
            )
        })?;

        if out.generated_text.is_empty() {
            return Err(ProviderError::new(
                LlmProvider::HuggingFace,
                ProviderErrorKind::EmptyGeneration,
            )
            .into());
        }

        Ok(out.generated_text)
    }
}

/* ==========================
HTTP payloads & options
========================== */

/// Request body for `/generate`.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

/// TGI generation parameters this service maps.
#[derive(Debug, Serialize)]
struct GenerateParameters {
    max_new_tokens: u32,
    temperature: f32,
    top_p: f32,
    top_k: u32,
    repetition_penalty: f32,
    truncate: u32,
    do_sample: bool,
    return_full_text: bool,
}

/// Response body for `/generate`.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    generated_text: String,
}
