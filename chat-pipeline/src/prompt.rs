//! Prompt builder and answer extraction for the two-turn dialogue template.

/// Marker that separates the question from the model's answer in the
/// decoded text.
pub const DIALOGUE_MARKER: &str = "DOCTOR:";

/// Wraps a question in the fixed two-turn template the model was trained on.
pub fn build_prompt(question: &str) -> String {
    format!("USER: {question}\n{DIALOGUE_MARKER}")
}

/// Extracts the raw candidate answer from the decoded text: the substring
/// after the **last** occurrence of the dialogue marker, trimmed.
///
/// When the marker never appears (some backends return only the completion,
/// or the model rewrote the template), the full decoded text is used as the
/// candidate instead of failing.
pub fn extract_answer(decoded: &str) -> &str {
    match decoded.rfind(DIALOGUE_MARKER) {
        Some(idx) => decoded[idx + DIALOGUE_MARKER.len()..].trim(),
        None => decoded.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_two_turn_template() {
        assert_eq!(
            build_prompt("What is PCOS?"),
            "USER: What is PCOS?\nDOCTOR:"
        );
    }

    #[test]
    fn extracts_after_last_marker() {
        let decoded = "USER: hi\nDOCTOR: first reply DOCTOR: final reply";
        assert_eq!(extract_answer(decoded), "final reply");
    }

    #[test]
    fn missing_marker_falls_back_to_full_text() {
        assert_eq!(extract_answer("  a bare completion  "), "a bare completion");
    }
}
