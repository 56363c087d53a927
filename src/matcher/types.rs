// types.rs
use serde::{Serialize, Deserialize};
use crate::ngram::BlockSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Fuzzy,
    Partial,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Fuzzy => "fuzzy",
            MatchType::Partial => "partial",
        }
    }
}

/// A provided block paired with its best-scoring extracted block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMatch {
    pub provided: String,
    pub matched: String,
    pub similarity: f64,
    pub match_type: MatchType,
}

impl BlockMatch {
    pub fn describe(&self) -> String {
        format!(
            "{} -> {} ({:.0}% {})",
            self.provided,
            self.matched,
            self.similarity * 100.0,
            self.match_type.as_str()
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlockMatchReport {
    pub matched_blocks: Vec<BlockMatch>,
    /// Sum of accepted similarities over the number of provided blocks
    pub block_score: f64,
    pub total_matches: usize,
    pub provided_blocks: BlockSet,
    pub extracted_blocks: BlockSet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddressDecision {
    /// Binding verdict, equal to the strict verdict
    pub address_matched: bool,
    pub fuzzy_address_matched: bool,
    pub strict_address_matched: bool,
    /// Block-derived address score in [0, 100] after floors
    pub final_score: f64,
    /// Enough strong blocks to treat the address as confirmed outright
    pub confirmed: bool,
    pub matched_ngram: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NameMatch {
    pub matched: bool,
    pub score: u8,
    pub ratio: f64,
}

impl NameMatch {
    pub fn none() -> Self {
        Self { matched: false, score: 0, ratio: 0.0 }
    }
}
