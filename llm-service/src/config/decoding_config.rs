use crate::error_handler::{LlmError, validate_range_f32};

/// Fixed decoding parameters for one generation call.
///
/// These values are constants of the service, never derived from request
/// input. Defaults match the tuning the chat model was deployed with:
/// stochastic nucleus sampling with a repetition penalty and a no-repeat
/// n-gram constraint to suppress looping output. No seed is fixed, so
/// outputs are not deterministic across calls.
///
/// Not every provider can express every field; each provider documents the
/// subset it maps at its request-building site.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodingConfig {
    /// Input is truncated to at most this many tokens before generation.
    pub max_input_tokens: u32,
    /// Upper bound on newly generated tokens.
    pub max_new_tokens: u32,
    /// Lower bound on newly generated tokens (where the backend supports it).
    pub min_new_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus sampling cutoff.
    pub top_p: f32,
    /// Top-k sampling cutoff.
    pub top_k: u32,
    /// Penalty applied to already-seen tokens.
    pub repetition_penalty: f32,
    /// Size of n-grams that must not repeat (where the backend supports it).
    pub no_repeat_ngram: u32,
}

impl Default for DecodingConfig {
    fn default() -> Self {
        Self {
            max_input_tokens: 200,
            max_new_tokens: 120,
            min_new_tokens: 15,
            temperature: 0.8,
            top_p: 0.85,
            top_k: 35,
            repetition_penalty: 1.15,
            no_repeat_ngram: 2,
        }
    }
}

impl DecodingConfig {
    /// Validates the sampling parameters.
    ///
    /// # Errors
    /// Returns [`LlmError::Config`] if a value is outside its allowed range.
    pub fn validate(&self) -> Result<(), LlmError> {
        validate_range_f32("temperature", self.temperature, 0.0, 2.0)?;
        validate_range_f32("top_p", self.top_p, 0.0, 1.0)?;
        validate_range_f32("repetition_penalty", self.repetition_penalty, 1.0, 2.0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = DecodingConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.max_input_tokens, 200);
        assert_eq!(cfg.max_new_tokens, 120);
        assert_eq!(cfg.min_new_tokens, 15);
        assert_eq!(cfg.top_k, 35);
        assert_eq!(cfg.no_repeat_ngram, 2);
    }

    #[test]
    fn rejects_out_of_range_top_p() {
        let cfg = DecodingConfig {
            top_p: 1.5,
            ..DecodingConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_temperature() {
        let cfg = DecodingConfig {
            temperature: f32::NAN,
            ..DecodingConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
