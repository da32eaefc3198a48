//! Document fraud analysis.
//!
//! Layers regex-based field extraction and document-specific suspicion
//! checks over the text heuristics. Pure function over the extracted
//! text plus the embedded text verdict.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{json, Map, Value};

use super::text::TextVerdict;

/// Verdict label for document analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentLabel {
    Legit,
    Suspicious,
}

/// Placeholder location for a finding. Extraction does not track
/// layout, so every finding carries the same fixed box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bbox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bbox {
    pub fn placeholder() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 100,
            height: 20,
        }
    }
}

/// A document-analysis annotation: location placeholder plus a
/// human-readable suspicion reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub bbox: Bbox,
    pub reason: String,
}

impl Finding {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            bbox: Bbox::placeholder(),
            reason: reason.into(),
        }
    }
}

/// Result of analyzing a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentVerdict {
    pub label: DocumentLabel,
    pub score: f64,
    pub findings: Vec<Finding>,
    #[serde(rename = "extractedFields")]
    pub extracted_fields: Map<String, Value>,
    pub model_version: String,
}

/// Dollar amounts, capture without the sign: "$1,234.56" -> "1,234.56".
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$([\d,]+\.?\d*)").unwrap());

/// Numeric and written-out dates: "01/15/2024", "January 15, 2024".
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\w+ \d{1,2},? \d{4})\b").unwrap()
});

/// Email addresses.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

/// Invoice numbers: "Invoice #12345", "invoice: 42".
static INVOICE_NUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"invoice\s*#?\s*:?\s*\d+").unwrap());

const URGENCY_WORDS: &[&str] = &["immediately", "urgent", "within 24 hours", "today"];

const PERSONAL_DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "hotmail.com"];

const SUSPICIOUS_PAYMENT_METHODS: &[&str] =
    &["wire transfer", "western union", "moneygram", "bitcoin", "crypto"];

const SENDER_MARKERS: &[&str] = &["from:", "company:", "sender:", "bill to:", "invoice from:"];

/// Analyze extracted document text, folding in the text verdict.
///
/// Each detection appends one finding and may raise the running score
/// via max; the final label is recomputed once from the aggregated
/// score at the end.
pub fn analyze(text: &str, text_verdict: &TextVerdict) -> DocumentVerdict {
    let lower = text.to_lowercase();

    let mut verdict = DocumentVerdict {
        label: if text_verdict.score > 0.5 {
            DocumentLabel::Suspicious
        } else {
            DocumentLabel::Legit
        },
        score: text_verdict.score,
        findings: Vec::new(),
        extracted_fields: Map::new(),
        model_version: text_verdict.model_version.clone(),
    };

    // Document type by characteristic keyword
    let document_type = if lower.contains("invoice") {
        "invoice"
    } else if lower.contains("contract") {
        "contract"
    } else if lower.contains("receipt") {
        "receipt"
    } else if lower.contains("bill") {
        "bill"
    } else {
        "document"
    };
    verdict
        .extracted_fields
        .insert("document_type".to_string(), json!(document_type));

    // Amounts: record the largest (likely the total), flag large ones
    let amounts: Vec<&str> = AMOUNT_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect();
    if let Some(largest) = amounts
        .iter()
        .max_by(|a, b| parse_amount(a).total_cmp(&parse_amount(b)))
    {
        verdict
            .extracted_fields
            .insert("amount".to_string(), json!(format!("${}", largest)));
    }
    for amount in &amounts {
        if parse_amount(amount) > 10_000.0 {
            verdict.findings.push(Finding::new(format!(
                "Large amount detected: ${} - verify legitimacy",
                amount
            )));
            verdict.score = verdict.score.max(0.7);
        }
    }

    // Dates, plus urgency language around payment deadlines
    let dates: Vec<&str> = DATE_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .take(3)
        .collect();
    if !dates.is_empty() {
        verdict
            .extracted_fields
            .insert("dates".to_string(), json!(dates));
        if URGENCY_WORDS.iter().any(|w| lower.contains(w)) {
            verdict
                .findings
                .push(Finding::new("Urgent payment deadline - common in scams"));
            verdict.score = verdict.score.max(0.8);
        }
    }

    // Contact emails, flagging personal domains on business invoices
    let emails: Vec<&str> = EMAIL_RE.find_iter(text).map(|m| m.as_str()).collect();
    if !emails.is_empty() {
        verdict.extracted_fields.insert(
            "contact_emails".to_string(),
            json!(emails.iter().take(2).collect::<Vec<_>>()),
        );
        for email in &emails {
            let domain = email.rsplit('@').next().unwrap_or("").to_lowercase();
            if PERSONAL_DOMAINS.iter().any(|d| domain.contains(d)) && document_type == "invoice" {
                verdict.findings.push(Finding::new(format!(
                    "Personal email used for business invoice: {}",
                    email
                )));
                verdict.score = verdict.score.max(0.6);
            }
        }
    }

    // Sender line among the document header
    for line in text.lines().take(10) {
        let line_lower = line.to_lowercase();
        if SENDER_MARKERS.iter().any(|m| line_lower.contains(m)) {
            verdict
                .extracted_fields
                .insert("sender".to_string(), json!(line.trim()));
            break;
        }
    }

    // Re-emit every text-analysis reason as a finding
    for reason in &text_verdict.reasons {
        verdict.findings.push(Finding::new(reason.clone()));
    }

    // Invoice-specific checks
    if document_type == "invoice" {
        if !INVOICE_NUM_RE.is_match(&lower) {
            verdict.findings.push(Finding::new(
                "No invoice number found - legitimate invoices have unique numbers",
            ));
            verdict.score = verdict.score.max(0.7);
        }
        if SUSPICIOUS_PAYMENT_METHODS.iter().any(|m| lower.contains(m)) {
            verdict.findings.push(Finding::new(
                "Suspicious payment method requested - often used in scams",
            ));
            verdict.score = verdict.score.max(0.85);
        }
    }

    // Final label from the aggregated score
    verdict.label = if verdict.score > 0.5 {
        DocumentLabel::Suspicious
    } else {
        DocumentLabel::Legit
    };
    verdict.score = verdict.score.clamp(0.0, 1.0);
    verdict
}

fn parse_amount(raw: &str) -> f64 {
    raw.replace(',', "").parse().unwrap_or(0.0)
}
