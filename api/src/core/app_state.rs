use std::sync::Arc;

use llm_service::service::LlmService;

/// Shared state for all HTTP handlers.
///
/// Holds only the immutable generation service; there is no per-request
/// mutable state, so no locking happens anywhere on the request path.
#[derive(Clone)]
pub struct AppState {
    /// Generation backend, loaded once before the listener binds.
    pub llm: Arc<LlmService>,
}

impl AppState {
    pub fn new(llm: Arc<LlmService>) -> Self {
        Self { llm }
    }
}
