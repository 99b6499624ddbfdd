//! Smart truncation: sentence-boundary cutoff under a word budget, plus the
//! fixed medical disclaimer.

/// Maximum number of words kept across accumulated sentence fragments.
pub const WORD_BUDGET: usize = 100;

/// Fixed two-line disclaimer appended to every generated answer.
pub const DISCLAIMER: &str =
    "\n\n💡 Please consult your healthcare provider for personalized advice.";

/// Truncates raw generated text to complete sentences within the word
/// budget and appends the disclaimer.
///
/// The text is split on the literal `". "`; fragments are accumulated in
/// order while the running word count stays at or below [`WORD_BUDGET`],
/// stopping at the first fragment that would exceed it. Accumulated
/// fragments are rejoined with `". "` and given a trailing period if
/// missing. If the very first fragment alone exceeds the budget, it is kept
/// whole (plus a period) regardless of length.
///
/// Empty input follows the same path and yields just a period before the
/// disclaimer; callers must not special-case it away.
pub fn smart_truncate(text: &str) -> String {
    let sentences: Vec<&str> = text.split(". ").collect();

    let mut word_count = 0usize;
    let mut selected: Vec<&str> = Vec::new();

    for sentence in &sentences {
        let sentence_words = sentence.split_whitespace().count();
        if word_count + sentence_words <= WORD_BUDGET {
            selected.push(sentence);
            word_count += sentence_words;
        } else {
            break;
        }
    }

    let mut result = if !selected.is_empty() {
        let mut joined = selected.join(". ");
        if !joined.ends_with('.') {
            joined.push('.');
        }
        joined
    } else {
        // Fallback: keep the first fragment whole, budget notwithstanding.
        format!("{}.", sentences[0])
    };

    result.push_str(DISCLAIMER);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_unchanged_except_disclaimer() {
        let raw = "Stay hydrated and rest.";
        let out = smart_truncate(raw);
        assert_eq!(out, format!("{raw}{DISCLAIMER}"));
    }

    #[test]
    fn appends_missing_trailing_period() {
        let out = smart_truncate("Stay hydrated and rest");
        assert_eq!(out, format!("Stay hydrated and rest.{DISCLAIMER}"));
    }

    #[test]
    fn stops_at_first_fragment_over_budget() {
        let short = "one two three";
        let long = "w ".repeat(99).trim_end().to_string();
        let raw = format!("{short}. {long}. tail");
        let out = smart_truncate(&raw);
        // The 99-word fragment would push the count past the budget, so only
        // the first fragment survives.
        assert_eq!(out, format!("{short}.{DISCLAIMER}"));
    }

    #[test]
    fn joined_portion_never_exceeds_budget() {
        let sentence = "alpha beta gamma delta epsilon zeta eta theta iota kappa";
        let raw = std::iter::repeat(sentence)
            .take(30)
            .collect::<Vec<_>>()
            .join(". ");
        let out = smart_truncate(&raw);
        let body = out.strip_suffix(DISCLAIMER).unwrap();
        assert!(body.split_whitespace().count() <= WORD_BUDGET);
        assert!(body.ends_with('.'));
    }

    #[test]
    fn single_oversized_fragment_is_kept_whole() {
        let raw = "w ".repeat(150).trim_end().to_string();
        let out = smart_truncate(&raw);
        let body = out.strip_suffix(DISCLAIMER).unwrap();
        assert_eq!(body, format!("{raw}."));
    }

    #[test]
    fn empty_input_yields_period_and_disclaimer() {
        assert_eq!(smart_truncate(""), format!(".{DISCLAIMER}"));
    }
}
