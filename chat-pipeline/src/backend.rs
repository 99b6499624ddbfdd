//! Seam between the pipeline and the generation backend.
//!
//! The orchestrator only needs `prompt in, decoded text out`; everything
//! else (provider choice, decoding parameters, timeouts) is fixed inside the
//! backend at startup. Tests swap in a mock implementation.

use std::future::Future;

use llm_service::error_handler::LlmError;
use llm_service::service::LlmService;

/// One stateless generation call with the backend's fixed decoding
/// configuration. Stochastic sampling, no retry, no seed.
pub trait GenerationBackend {
    /// Generates decoded text (special tokens removed) for `prompt`.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, LlmError>> + Send;
}

impl GenerationBackend for LlmService {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, LlmError>> + Send {
        LlmService::generate(self, prompt)
    }
}
