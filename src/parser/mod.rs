pub mod address;
pub mod patterns;

use lazy_static::lazy_static;

pub trait TextParser: Sync + Send {
    /// Lowercase, strip punctuation, fold known misspellings, collapse whitespace
    fn normalize(&self, text: &str) -> String;

    /// Normalized text with all whitespace removed, for character-level comparison
    fn normalize_for_matching(&self, text: &str) -> String {
        compact(&self.normalize(text))
    }

    /// Letters-only normalization used for personal names
    fn normalize_name(&self, text: &str) -> String;

    /// Split text into normalized word tokens
    fn tokenize(&self, text: &str) -> Vec<String>;
}

pub use self::address::AddressParser;

lazy_static! {
    static ref DEFAULT_PARSER: AddressParser = AddressParser::new_with_defaults();
}

/// Normalizes `text` with the default parser settings.
pub fn normalize(text: &str) -> String {
    DEFAULT_PARSER.normalize(text)
}

/// Normalizes `text` with the default parser settings and removes all whitespace.
pub fn normalize_for_matching(text: &str) -> String {
    DEFAULT_PARSER.normalize_for_matching(text)
}

/// Removes every whitespace character.
pub fn compact(text: &str) -> String {
    text.split_whitespace().collect()
}
