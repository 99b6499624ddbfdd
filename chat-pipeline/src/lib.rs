//! Response-safety and formatting pipeline with a single public function.
//!
//! Public API: [`respond`]. Given a question it runs the ordered triage
//! (emergency scan first, then domain scan), and only for in-domain
//! questions builds the two-turn prompt, calls the generation backend once
//! with its fixed decoding configuration, extracts the answer after the
//! dialogue marker, and applies smart truncation plus the medical
//! disclaimer. Exactly one of four terminal outcomes is produced per call.

pub mod api_types;
pub mod backend;
pub mod format;
pub mod prompt;
pub mod triage;

pub use api_types::{APOLOGY_MESSAGE, ChatResult, MessageType, OUT_OF_DOMAIN_MESSAGE};
pub use backend::GenerationBackend;

use llm_service::error_handler::LlmError;
use tracing::warn;

use crate::triage::Triage;

/// Runs the full pipeline for one question and returns the sole output
/// contract, [`ChatResult`].
///
/// Ordering is enforced structurally: the emergency scan always runs first,
/// the domain scan runs only when no trigger matched, and generation runs
/// only for in-domain questions. A backend failure is caught here and
/// converted to the fixed apology; raw error text is logged, never returned.
/// No state outlives the call.
///
/// The caller is responsible for rejecting empty/whitespace-only questions
/// before invoking the pipeline.
pub async fn respond<B: GenerationBackend>(backend: &B, question: &str) -> ChatResult {
    match triage::classify(question) {
        Triage::Emergency(message) => ChatResult::emergency(message),
        Triage::OutOfDomain => ChatResult::out_of_domain(),
        Triage::InDomain => match generate_answer(backend, question).await {
            Ok(answer) => ChatResult::normal(answer),
            Err(err) => {
                warn!(error = %err, "generation failed; returning apology");
                ChatResult::error()
            }
        },
    }
}

/// Generation leg of the pipeline: prompt, one backend call, marker
/// extraction, smart truncation.
async fn generate_answer<B: GenerationBackend>(
    backend: &B,
    question: &str,
) -> Result<String, LlmError> {
    let prompt = prompt::build_prompt(question);
    let decoded = backend.generate(&prompt).await?;
    let candidate = prompt::extract_answer(&decoded);
    Ok(format::smart_truncate(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_service::config::llm_provider::LlmProvider;
    use llm_service::error_handler::{ProviderError, ProviderErrorKind};
    use std::future::Future;

    /// Backend double: echoes a canned decoded text or fails.
    struct MockBackend {
        reply: Result<String, ()>,
    }

    impl MockBackend {
        fn replying(decoded: &str) -> Self {
            Self {
                reply: Ok(decoded.to_string()),
            }
        }

        fn failing() -> Self {
            Self { reply: Err(()) }
        }
    }

    impl GenerationBackend for MockBackend {
        fn generate(&self, _prompt: &str) -> impl Future<Output = Result<String, LlmError>> + Send {
            let reply = self.reply.clone().map_err(|_| {
                LlmError::from(ProviderError::new(
                    LlmProvider::Ollama,
                    ProviderErrorKind::Decode("backend exploded".into()),
                ))
            });
            async move { reply }
        }
    }

    #[tokio::test]
    async fn emergency_bypasses_generation_and_domain() {
        let backend = MockBackend::failing();
        let res = respond(&backend, "I'm having thoughts of hurting myself").await;
        assert!(res.success);
        assert_eq!(res.message_type, MessageType::Emergency);
        assert!(res.response.contains("988"));
    }

    #[tokio::test]
    async fn off_topic_question_is_redirected() {
        let backend = MockBackend::failing();
        let res = respond(&backend, "How to cook pasta?").await;
        assert!(res.success);
        assert_eq!(res.message_type, MessageType::OutOfDomain);
        assert!(res.response.contains("women's health specialist"));
    }

    #[tokio::test]
    async fn in_domain_question_returns_formatted_answer() {
        let backend = MockBackend::replying(
            "USER: What are the symptoms of PCOS?\nDOCTOR: Common symptoms include irregular periods and acne.",
        );
        let res = respond(&backend, "What are the symptoms of PCOS?").await;
        assert!(res.success);
        assert_eq!(res.message_type, MessageType::Normal);
        assert!(res.response.starts_with("Common symptoms include"));
        assert!(res.response.ends_with(format::DISCLAIMER));
    }

    #[tokio::test]
    async fn marker_free_completion_is_still_answered() {
        let backend = MockBackend::replying("Irregular cycles are a frequent sign.");
        let res = respond(&backend, "Tell me about my menstrual cycle").await;
        assert_eq!(res.message_type, MessageType::Normal);
        assert!(res.response.starts_with("Irregular cycles"));
    }

    #[tokio::test]
    async fn backend_failure_becomes_fixed_apology() {
        let backend = MockBackend::failing();
        let res = respond(&backend, "What are the symptoms of PCOS?").await;
        assert!(!res.success);
        assert_eq!(res.message_type, MessageType::Error);
        assert_eq!(res.response, APOLOGY_MESSAGE);
        // Raw backend error text never leaks into the response.
        assert!(!res.response.contains("backend exploded"));
    }
}
