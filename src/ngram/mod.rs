pub mod blocks;
pub mod phrase;

pub use self::blocks::{BlockExtractor, BlockSet};
pub use self::phrase::{strict_ngram_match, supports_strict_gate};

use lazy_static::lazy_static;
use crate::config::MatcherConfig;
use crate::parser::AddressParser;

lazy_static! {
    static ref DEFAULT_EXTRACTOR: BlockExtractor<AddressParser> =
        BlockExtractor::new(AddressParser::new_with_defaults(), &MatcherConfig::default());
}

/// Blocks of a provided address with default settings.
pub fn extract_provided_blocks(address: &str) -> BlockSet {
    DEFAULT_EXTRACTOR.extract_provided_blocks(address)
}

/// Blocks of OCR text with default settings.
pub fn extract_text_blocks(text: &str) -> BlockSet {
    DEFAULT_EXTRACTOR.extract_text_blocks(text)
}
