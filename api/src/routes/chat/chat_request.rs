use serde::Deserialize;

/// Request payload for /chat.
///
/// The response payload is `chat_pipeline::ChatResult` serialized verbatim:
/// `{ success, response, message_type }`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Free-text question. Must be non-empty after trimming; enforced by the
    /// route, never by the pipeline.
    pub question: String,
}
