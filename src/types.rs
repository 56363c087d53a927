use serde::{Serialize, Deserialize};

use crate::matcher::types::BlockMatch;

/// One document to verify: what the user typed and what OCR read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInput {
    pub provided_address: String,
    #[serde(default)]
    pub provided_full_name: String,
    pub extracted_text: String,
    /// OCR confidence (0-100), reported back as-is
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl MatchInput {
    pub fn new(address: &str, full_name: &str, extracted_text: &str) -> Self {
        Self {
            provided_address: address.to_string(),
            provided_full_name: full_name.to_string(),
            extracted_text: extracted_text.to_string(),
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub extracted_text: String,
    /// Address-like fragments of the text; informational only
    pub found_addresses: Vec<String>,
    /// Binding verdict: the strict verdict, or the fuzzy one for short addresses
    pub address_matched: bool,
    pub fuzzy_address_matched: bool,
    pub strict_address_matched: bool,
    pub name_matched: bool,
    pub match_score: u8,
    /// Passed through from OCR, 0 when unknown
    pub confidence: f64,
    pub block_matches: usize,
    pub total_blocks: usize,
    pub matching_blocks: Vec<String>,
    pub normalized_provided_address: String,
    pub normalized_extracted_text: String,
    pub matched_ngram: Option<String>,
    pub address_score: f64,
    pub name_score: u8,
    pub block_details: Vec<BlockMatch>,
}
