use std::str::FromStr;

use crate::error_handler::ConfigError;

/// Represents the provider (backend) used for large language model (LLM)
/// inference.
///
/// This enum distinguishes between the supported generation backends: a local
/// Ollama runtime or a HuggingFace text-generation-inference server hosting
/// the chat model.
///
/// Adding more providers in the future (e.g., OpenAI, Anthropic) can be done
/// by extending this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Local Ollama runtime for on-device inference.
    Ollama,
    /// HuggingFace text-generation-inference endpoint.
    HuggingFace,
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(LlmProvider::Ollama),
            "huggingface" | "hf" | "tgi" => Ok(LlmProvider::HuggingFace),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_providers() {
        assert_eq!("ollama".parse::<LlmProvider>().unwrap(), LlmProvider::Ollama);
        assert_eq!("TGI".parse::<LlmProvider>().unwrap(), LlmProvider::HuggingFace);
        assert_eq!("hf".parse::<LlmProvider>().unwrap(), LlmProvider::HuggingFace);
    }

    #[test]
    fn rejects_unknown_provider() {
        assert!("llama-cpp".parse::<LlmProvider>().is_err());
    }
}
