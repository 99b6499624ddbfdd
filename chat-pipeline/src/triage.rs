//! Keyword triage: emergency detection and domain classification.
//!
//! Both checks are deliberately crude substring scans over the lowercased
//! question. For the emergency table, false positives are acceptable and
//! false negatives are not, so the trigger set errs toward overinclusion
//! and no tokenization or negation handling is attempted. A trigger word
//! embedded inside an unrelated longer word still matches; that is kept as
//! a known limitation.

/// Ordered (trigger phrase, fixed response) pairs. First match wins, in
/// table order, so more specific phrases must come before generic ones if
/// they should take precedence.
pub const EMERGENCY_RULES: &[(&str, &str)] = &[
    (
        "suicide",
        "🆘 This seems serious. Please contact the National Suicide Prevention Lifeline at 988 or go to your nearest emergency room immediately.",
    ),
    (
        "kill myself",
        "🆘 Please reach out for help immediately. National Suicide Prevention Lifeline: 988 or emergency services: 911.",
    ),
    (
        "hurt myself",
        "🆘 Please contact a crisis helpline: National Suicide Prevention Lifeline 988 or Crisis Text Line: Text HOME to 741741.",
    ),
    (
        "hurting myself",
        "🆘 Please contact a crisis helpline: National Suicide Prevention Lifeline 988 or Crisis Text Line: Text HOME to 741741.",
    ),
    (
        "severe bleeding",
        "🚨 Heavy bleeding can be a medical emergency. Please seek immediate medical attention or call 911.",
    ),
    (
        "severe pain",
        "🚨 Severe pain requires immediate medical evaluation. Please contact your healthcare provider or emergency services.",
    ),
    (
        "emergency",
        "🚨 This sounds like a medical emergency. Please call emergency services immediately or go to your nearest emergency room.",
    ),
    (
        "unconscious",
        "🚨 Loss of consciousness is a medical emergency. Call 911 immediately.",
    ),
    (
        "overdose",
        "🚨 This is a medical emergency. Call Poison Control at 1-800-222-1222 or 911 immediately.",
    ),
];

/// Lowercase substrings that mark a question as in-scope for generation.
pub const DOMAIN_KEYWORDS: &[&str] = &[
    "pregnancy",
    "period",
    "menstrual",
    "contraception",
    "fertility",
    "breast",
    "vaginal",
    "uterus",
    "ovary",
    "hormone",
    "pcos",
    "endometriosis",
    "menopause",
    "pap smear",
    "gynecologist",
    "birth control",
    "ovulation",
    "cramps",
    "discharge",
    "infection",
    "health",
    "pain",
    "symptoms",
    "doctor",
    "medical",
    "pregnant",
    "cycle",
    "bleeding",
    "contraceptive",
    "reproductive",
    "sex",
    "sexual health",
    "bleed",
    "menstruation",
    "wellness",
    "obstetrics",
    "gynecology",
    "vulva",
    "intercourse",
    "fertility awareness",
    "prenatal",
    "postnatal",
    "hysterectomy",
    "fibroids",
    "cervical health",
    "vaginitis",
    "premenstrual syndrome",
    "pms",
    "pelvic pain",
];

/// Outcome of the ordered triage step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Triage {
    /// A safety trigger matched; carries the fixed response for it.
    Emergency(&'static str),
    /// No trigger and no domain keyword matched.
    OutOfDomain,
    /// No trigger matched and at least one domain keyword did.
    InDomain,
}

/// Returns the fixed safety message for the first matching trigger phrase,
/// in table order, or `None` when no trigger matches.
pub fn detect_emergency(question: &str) -> Option<&'static str> {
    let lower = question.to_lowercase();
    EMERGENCY_RULES
        .iter()
        .find(|(trigger, _)| lower.contains(trigger))
        .map(|(_, response)| *response)
}

/// True iff any domain keyword is a substring of the lowercased question.
pub fn is_in_domain(question: &str) -> bool {
    let lower = question.to_lowercase();
    DOMAIN_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Classifies a question, enforcing the ordering invariant structurally:
/// the emergency scan always runs before the domain scan, and the domain
/// scan only runs when no trigger matched.
pub fn classify(question: &str) -> Triage {
    if let Some(response) = detect_emergency(question) {
        return Triage::Emergency(response);
    }
    if is_in_domain(question) {
        Triage::InDomain
    } else {
        Triage::OutOfDomain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_trigger_case_insensitively() {
        let msg = detect_emergency("I think this is an EMERGENCY").unwrap();
        assert!(msg.contains("emergency services"));
    }

    #[test]
    fn first_match_wins_in_table_order() {
        // Both "suicide" and "overdose" are present; "suicide" sits earlier
        // in the table.
        let msg = detect_emergency("suicide by overdose").unwrap();
        assert!(msg.contains("National Suicide Prevention Lifeline at 988"));
    }

    #[test]
    fn self_harm_phrases_return_crisis_line() {
        // Both inflections are listed explicitly; the scan is substring-based
        // and does no stemming.
        let msg = detect_emergency("I'm having thoughts of hurting myself").unwrap();
        assert!(msg.contains("Crisis Text Line"));

        let msg = detect_emergency("I want to hurt myself").unwrap();
        assert!(msg.contains("Crisis Text Line"));
    }

    #[test]
    fn embedded_substring_false_positive_is_preserved() {
        // "period" embedded in "periodically" still counts as in-domain;
        // crude substring matching is intentional.
        assert!(is_in_domain("my knee hurts periodically"));
    }

    #[test]
    fn emergency_precedes_domain() {
        // Contains both a trigger and a domain keyword; emergency wins.
        match classify("severe bleeding during my period") {
            Triage::Emergency(msg) => assert!(msg.contains("medical emergency")),
            other => panic!("expected emergency, got {other:?}"),
        }
    }

    #[test]
    fn unrelated_question_is_out_of_domain() {
        assert_eq!(classify("How to cook pasta?"), Triage::OutOfDomain);
    }

    #[test]
    fn domain_question_is_in_domain() {
        assert_eq!(classify("What are the symptoms of PCOS?"), Triage::InDomain);
    }
}
