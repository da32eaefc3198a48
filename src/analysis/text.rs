//! Scam heuristic engine for free-form text.
//!
//! Combines keyword matching, numeric-pattern regexes, and remote
//! classifier predictions into a single verdict. The engine is a pure
//! function over (text, lexicon, predictions): it performs no I/O and
//! the score only ever moves upward as detection stages run.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::lexicon::Lexicon;
use crate::inference::Prediction;

/// Version tag reported by the live analysis pipeline.
pub const MODEL_VERSION: &str = "hf-inference-v1";

/// Fixed reason appended when a matched keyword is an advance-fee
/// indicator.
pub const ADVANCE_FEE_REASON: &str =
    "ADVANCE-FEE SCAM DETECTED: classic inheritance/advance-fee scam pattern";

/// Fixed reason appended when nothing suspicious was found.
pub const NO_INDICATORS_REASON: &str = "No obvious scam indicators found";

/// Remote classifier labels accepted as a phishing signal.
const PHISHING_LABELS: &[&str] = &["spam", "phishing", "1", "positive"];

/// Remote classifier labels accepted as a spam signal.
const SPAM_LABELS: &[&str] = &["spam", "1"];

/// Greetings typical of scam emails.
const GENERIC_GREETINGS: &[&str] = &["dear friend", "dear beloved", "dear sir/madam"];

/// Large money amounts, e.g. "$10 million" or "5,000 dollars".
static MONEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$?\d+[,.]?\d*\s*(million|thousand|billion|usd|dollars)").unwrap()
});

/// Verdict label for text analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextLabel {
    Legit,
    Phishing,
}

/// A matched span in the (lowercased) input text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub start: usize,
    pub end: usize,
    pub reason: String,
}

/// Result of analyzing a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextVerdict {
    pub label: TextLabel,
    pub score: f64,
    pub highlights: Vec<Highlight>,
    pub reasons: Vec<String>,
    pub model_version: String,
}

/// Run the heuristic stages over `text`.
///
/// Stage order is fixed: keyword scan, remote classifier folding,
/// keyword scoring, money/greeting regex detectors, and finally the
/// no-indicators note. Each stage folds into the score via a running
/// maximum, so the score never decreases, and the label flips from
/// `Legit` to `Phishing` the first time any stage sets it. Reasons
/// accumulate in stage order without deduplication.
pub fn analyze(
    text: &str,
    lexicon: &Lexicon,
    phishing_preds: Option<&[Prediction]>,
    spam_preds: Option<&[Prediction]>,
) -> TextVerdict {
    let lower = text.to_lowercase();

    let mut verdict = TextVerdict {
        label: TextLabel::Legit,
        score: 0.1,
        highlights: Vec::new(),
        reasons: Vec::new(),
        model_version: MODEL_VERSION.to_string(),
    };

    // Stage (a): keyword scan. First occurrence fixes the highlighted
    // span regardless of how often the phrase repeats.
    let mut found: Vec<&str> = Vec::new();
    for phrase in lexicon.phrases() {
        if let Some(start) = lower.find(phrase) {
            found.push(phrase);
            verdict.highlights.push(Highlight {
                start,
                end: start + phrase.len(),
                reason: format!("Suspicious phrase: '{}'", phrase),
            });
        }
    }

    // Stage (b): remote classifier predictions.
    if let Some(preds) = phishing_preds {
        for pred in preds {
            if PHISHING_LABELS.contains(&pred.label.to_lowercase().as_str()) {
                verdict.score = verdict.score.max(pred.score.unwrap_or(0.5));
                verdict.label = TextLabel::Phishing;
                verdict
                    .reasons
                    .push("AI model detected phishing patterns".to_string());
            }
        }
    }
    if let Some(preds) = spam_preds {
        for pred in preds {
            if SPAM_LABELS.contains(&pred.label.to_lowercase().as_str()) {
                verdict.score = verdict.score.max(pred.score.unwrap_or(0.5));
                if verdict.label == TextLabel::Legit {
                    verdict.label = TextLabel::Phishing;
                }
                verdict.reasons.push("Spam detection triggered".to_string());
            }
        }
    }

    // Stage (c): keyword scoring.
    if !found.is_empty() {
        let keyword_score = (0.3 + 0.15 * found.len() as f64).min(0.95);
        verdict.score = verdict.score.max(keyword_score);

        if found.iter().any(|k| lexicon.is_advance_fee_indicator(k)) {
            verdict.reasons.push(ADVANCE_FEE_REASON.to_string());
            verdict.score = verdict.score.max(0.9);
        } else {
            let shown: Vec<&str> = found.iter().take(5).copied().collect();
            let suffix = if found.len() > 5 { "..." } else { "" };
            verdict.reasons.push(format!(
                "Found suspicious keywords: {}{}",
                shown.join(", "),
                suffix
            ));
        }

        if verdict.label == TextLabel::Legit {
            verdict.label = TextLabel::Phishing;
        }
    }

    // Stage (d): pattern detectors.
    if MONEY_RE.is_match(&lower) {
        verdict.score = verdict.score.max(0.7);
        verdict
            .reasons
            .push("Large money amounts mentioned - common in advance-fee scams".to_string());
        if verdict.label == TextLabel::Legit {
            verdict.label = TextLabel::Phishing;
        }
    }
    if GENERIC_GREETINGS.iter().any(|g| lower.contains(g)) {
        verdict.score = verdict.score.max(0.8);
        verdict
            .reasons
            .push("Generic greeting typical of scam emails".to_string());
        if verdict.label == TextLabel::Legit {
            verdict.label = TextLabel::Phishing;
        }
    }

    // Stage (e): nothing fired.
    if found.is_empty() && verdict.score < 0.3 {
        verdict.reasons.push(NO_INDICATORS_REASON.to_string());
    }

    verdict.score = verdict.score.clamp(0.0, 1.0);
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::builtin()
    }

    fn pred(label: &str, score: f64) -> Prediction {
        Prediction {
            label: label.to_string(),
            score: Some(score),
        }
    }

    #[test]
    fn test_clean_text_is_legit() {
        let verdict = analyze("Meeting moved to 3pm tomorrow", &lexicon(), None, None);
        assert_eq!(verdict.label, TextLabel::Legit);
        assert!(verdict.score < 0.3);
        assert_eq!(verdict.reasons, vec![NO_INDICATORS_REASON.to_string()]);
        assert!(verdict.highlights.is_empty());
    }

    #[test]
    fn test_advance_fee_scenario() {
        let text =
            "Dear beloved, I am a barrister with million dollars inheritance, wire transfer needed";
        let verdict = analyze(text, &lexicon(), None, None);
        assert_eq!(verdict.label, TextLabel::Phishing);
        assert!(verdict.score >= 0.9);
        assert!(verdict.reasons.iter().any(|r| r == ADVANCE_FEE_REASON));
        assert!(!verdict.highlights.is_empty());
    }

    #[test]
    fn test_score_bounds() {
        let texts = [
            "",
            "hello",
            "urgent urgent urgent wire transfer lottery winner million dollars inheritance \
             beneficiary nigeria attorney barrister claim your prize act now",
            "Dear sir/madam, $5 million awaits you",
        ];
        for text in texts {
            let verdict = analyze(text, &lexicon(), None, None);
            assert!(
                (0.0..=1.0).contains(&verdict.score),
                "score out of range for {:?}",
                text
            );
        }
    }

    #[test]
    fn test_superset_never_scores_lower() {
        let base = "please review the urgent request";
        let superset = "please review the urgent request and claim your prize via wire transfer";
        let base_score = analyze(base, &lexicon(), None, None).score;
        let superset_score = analyze(superset, &lexicon(), None, None).score;
        assert!(superset_score >= base_score);
    }

    #[test]
    fn test_idempotent() {
        let text = "Congratulations! You are the lottery winner, act now";
        let first = analyze(text, &lexicon(), None, None);
        let second = analyze(text, &lexicon(), None, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_remote_prediction_folds_via_max() {
        let text = "Meeting moved to 3pm tomorrow";
        let verdict = analyze(
            text,
            &lexicon(),
            Some(&[pred("phishing", 0.92)]),
            Some(&[pred("ham", 0.99)]),
        );
        assert_eq!(verdict.label, TextLabel::Phishing);
        assert_eq!(verdict.score, 0.92);
        assert!(verdict
            .reasons
            .iter()
            .any(|r| r == "AI model detected phishing patterns"));
        // The accepted spam labels exclude "ham"
        assert!(!verdict.reasons.iter().any(|r| r == "Spam detection triggered"));
    }

    #[test]
    fn test_remote_prediction_never_lowers_keyword_score() {
        let text = "inheritance transfer from a barrister, wire transfer needed urgent";
        let with_weak_remote = analyze(text, &lexicon(), Some(&[pred("phishing", 0.2)]), None);
        let without_remote = analyze(text, &lexicon(), None, None);
        assert!(with_weak_remote.score >= without_remote.score);
        assert!(with_weak_remote.score >= 0.9);
    }

    #[test]
    fn test_missing_score_defaults() {
        let verdict = analyze(
            "hello there",
            &lexicon(),
            Some(&[Prediction {
                label: "phishing".to_string(),
                score: None,
            }]),
            None,
        );
        assert_eq!(verdict.score, 0.5);
        assert_eq!(verdict.label, TextLabel::Phishing);
    }

    #[test]
    fn test_money_pattern() {
        let verdict = analyze("send me 5 million now", &lexicon(), None, None);
        assert!(verdict.score >= 0.7);
        assert_eq!(verdict.label, TextLabel::Phishing);
    }

    #[test]
    fn test_generic_greeting() {
        let verdict = analyze("Dear friend, how are you", &lexicon(), None, None);
        assert!(verdict.score >= 0.8);
        assert_eq!(verdict.label, TextLabel::Phishing);
    }

    #[test]
    fn test_highlight_spans_first_occurrence() {
        let text = "urgent! this is urgent";
        let verdict = analyze(text, &lexicon(), None, None);
        let highlight = verdict
            .highlights
            .iter()
            .find(|h| h.reason.contains("urgent"))
            .unwrap();
        assert_eq!(highlight.start, 0);
        assert_eq!(highlight.end, "urgent".len());
    }

    #[test]
    fn test_keyword_reason_truncates_to_five() {
        let text = "urgent winner prize refund suspended lottery";
        let verdict = analyze(text, &lexicon(), None, None);
        let reason = verdict
            .reasons
            .iter()
            .find(|r| r.starts_with("Found suspicious keywords"))
            .unwrap();
        assert!(reason.ends_with("..."));
        assert_eq!(reason.matches(", ").count(), 4);
    }
}
