//! Scam keyword lexicon.
//!
//! An immutable phrase table injected at startup. The built-in table
//! covers the classic scam families; deployments can replace it with a
//! TOML file (e.g. for localization) without touching the engine.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// A named group of scam phrases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub phrases: Vec<String>,
}

/// Keyword dictionary scanned against submitted text.
///
/// Category order is significant: it fixes the scan order, which in
/// turn fixes highlight ordering when phrases overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Phrases that, when matched, mark the text as an advance-fee
    /// scam with a 0.9 score floor.
    #[serde(default)]
    pub advance_fee_indicators: Vec<String>,
}

impl Lexicon {
    /// The built-in English lexicon.
    pub fn builtin() -> Self {
        let category = |name: &str, phrases: &[&str]| Category {
            name: name.to_string(),
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
        };

        Self {
            categories: vec![
                category(
                    "urgency",
                    &[
                        "urgent",
                        "verify account",
                        "suspended",
                        "click here",
                        "act now",
                        "limited time",
                        "congratulations",
                        "winner",
                        "prize",
                        "refund",
                    ],
                ),
                category(
                    "advance-fee",
                    &[
                        "dear beloved",
                        "dear friend",
                        "business proposal",
                        "million dollars",
                        "million usd",
                        "transfer",
                        "inheritance",
                        "deceased",
                        "beneficiary",
                        "bank account",
                        "foreign account",
                        "trapped funds",
                        "frozen funds",
                        "nigeria",
                        "african bank",
                        "central bank",
                        "attorney",
                        "barrister",
                        "next of kin",
                        "unclaimed",
                        "confidential",
                        "discreet",
                        "secret",
                        "percentage",
                        "share",
                        "partner",
                        "assistance",
                        "help me",
                        "god bless",
                        "blessed day",
                        "trust",
                        "honest",
                        "legitimate",
                    ],
                ),
                category(
                    "financial",
                    &[
                        "wire transfer",
                        "western union",
                        "moneygram",
                        "payment required",
                        "processing fee",
                        "administration fee",
                        "clearance fee",
                        "tax payment",
                    ],
                ),
                category(
                    "lottery",
                    &["lottery", "jackpot", "selected", "chosen", "claim your"],
                ),
                category(
                    "romance",
                    &["lonely", "widow", "orphan", "soldier", "oil rig"],
                ),
                category(
                    "generic",
                    &[
                        "100% guaranteed",
                        "risk free",
                        "act immediately",
                        "don't delete",
                        "this is not spam",
                        "not a scam",
                        "perfectly legal",
                    ],
                ),
            ],
            advance_fee_indicators: [
                "million",
                "transfer",
                "bank account",
                "nigeria",
                "inheritance",
                "beneficiary",
                "foreign",
                "attorney",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }

    /// Parse a lexicon from TOML.
    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    /// Load a lexicon from a TOML file.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let input = std::fs::read_to_string(path)?;
        let lexicon = Self::from_toml(&input)?;
        if lexicon.is_empty() {
            anyhow::bail!("lexicon at {} contains no phrases", path.display());
        }
        Ok(lexicon)
    }

    /// All phrases in scan order.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|c| c.phrases.iter().map(String::as_str))
    }

    /// Whether a matched phrase is an advance-fee indicator.
    pub fn is_advance_fee_indicator(&self, phrase: &str) -> bool {
        self.advance_fee_indicators.iter().any(|i| i == phrase)
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.phrases.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contents() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.len() > 60);
        let phrases: Vec<&str> = lexicon.phrases().collect();
        assert!(phrases.contains(&"barrister"));
        assert!(phrases.contains(&"wire transfer"));
        assert!(phrases.contains(&"lottery"));
        // Scan order starts with the urgency family
        assert_eq!(phrases[0], "urgent");
    }

    #[test]
    fn test_advance_fee_membership() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.is_advance_fee_indicator("inheritance"));
        assert!(lexicon.is_advance_fee_indicator("transfer"));
        // "million dollars" is a keyword but not an indicator phrase
        assert!(!lexicon.is_advance_fee_indicator("million dollars"));
        assert!(!lexicon.is_advance_fee_indicator("barrister"));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml = r#"
            advance_fee_indicators = ["herencia"]

            [[categories]]
            name = "urgencia"
            phrases = ["urgente", "actúe ahora"]
        "#;
        let lexicon = Lexicon::from_toml(toml).unwrap();
        assert_eq!(lexicon.len(), 2);
        assert!(lexicon.is_advance_fee_indicator("herencia"));
        assert_eq!(lexicon.phrases().next(), Some("urgente"));
    }
}
