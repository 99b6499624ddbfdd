use serde::{Deserialize, Serialize};

/// Which terminal branch of the pipeline produced the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// A safety trigger matched; generation was bypassed.
    Emergency,
    /// The question is outside the women's-health domain.
    OutOfDomain,
    /// A generated, truncated, disclaimer-appended answer.
    Normal,
    /// Generation failed; the response carries the fixed apology.
    Error,
}

/// The sole output contract of the pipeline.
///
/// Constructed fresh per call and immutable once built; carries no
/// identifiers or timestamps. Serializes to the wire shape
/// `{ success, response, message_type }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResult {
    /// False only for the error branch.
    pub success: bool,
    /// User-visible response text.
    pub response: String,
    /// Which branch produced the response.
    pub message_type: MessageType,
}

/// Fixed redirect shown for questions outside the supported domain.
pub const OUT_OF_DOMAIN_MESSAGE: &str = "🌸 Hey there, I'm Luna, a women's health specialist chatbot 💕. I can help with questions about reproductive health, pregnancy, menstrual health, contraception, fertility, and other women's wellness topics🌈. Could you ask a women's health related question?✨";

/// Fixed apology shown when the generation backend fails.
pub const APOLOGY_MESSAGE: &str =
    "I apologize, but I'm having trouble generating a response right now. Please try again.";

impl ChatResult {
    /// Emergency branch: fixed safety message, success is still true.
    pub fn emergency(message: &str) -> Self {
        Self {
            success: true,
            response: message.to_string(),
            message_type: MessageType::Emergency,
        }
    }

    /// Out-of-domain branch: fixed redirect message.
    pub fn out_of_domain() -> Self {
        Self {
            success: true,
            response: OUT_OF_DOMAIN_MESSAGE.to_string(),
            message_type: MessageType::OutOfDomain,
        }
    }

    /// Normal branch: a formatted generated answer.
    pub fn normal(answer: String) -> Self {
        Self {
            success: true,
            response: answer,
            message_type: MessageType::Normal,
        }
    }

    /// Error branch: fixed apology, the only branch with `success = false`.
    pub fn error() -> Self {
        Self {
            success: false,
            response: APOLOGY_MESSAGE.to_string(),
            message_type: MessageType::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_type_wire_names() {
        let json = serde_json::to_string(&MessageType::OutOfDomain).unwrap();
        assert_eq!(json, "\"out_of_domain\"");
        let json = serde_json::to_string(&MessageType::Emergency).unwrap();
        assert_eq!(json, "\"emergency\"");
    }

    #[test]
    fn error_result_shape() {
        let res = ChatResult::error();
        assert!(!res.success);
        assert_eq!(res.response, APOLOGY_MESSAGE);
        assert_eq!(res.message_type, MessageType::Error);
    }
}
