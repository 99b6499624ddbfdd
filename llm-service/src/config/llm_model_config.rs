use crate::config::llm_provider::LlmProvider;

/// Configuration for one LLM backend endpoint.
///
/// This struct identifies *where* generation happens; the sampling knobs live
/// separately in [`crate::config::decoding_config::DecodingConfig`] because
/// they are constant across tiers while the endpoint/model pair changes
/// between the primary and fallback configurations.
///
/// # Fields
///
/// - `provider`: Which LLM backend to use (Ollama or HuggingFace TGI).
/// - `model`: The model identifier (e.g., `"JCholder/womens-health-chatbot"`).
/// - `endpoint`: The inference endpoint (local server or remote API URL).
/// - `api_key`: Optional bearer token for providers that require one.
/// - `timeout_secs`: Optional request timeout in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string.
    pub model: String,

    /// Inference endpoint (local socket/URL or remote API URL).
    pub endpoint: String,

    /// Optional bearer token for authentication.
    pub api_key: Option<String>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
