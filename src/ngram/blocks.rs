// src/ngram/blocks.rs

use std::collections::BTreeSet;
use log::{debug, trace};

use crate::config::MatcherConfig;
use crate::parser::patterns::{keyword_hits, COMPOUND_RULES};
use crate::parser::{compact, TextParser};

/// A deduplicated set of comparison blocks. Blocks never contain whitespace.
pub type BlockSet = BTreeSet<String>;

/// Splits addresses and OCR text into the atomic units compared by the
/// block matcher: single tokens, run-together n-grams, compound address
/// idioms and keyword-dense lines.
pub struct BlockExtractor<P: TextParser> {
    pub(crate) parser: P,
    pub(crate) bigram_min_len: usize,
    pub(crate) trigram_min_len: usize,
}

impl<P: TextParser> BlockExtractor<P> {
    pub fn new(parser: P, config: &MatcherConfig) -> Self {
        Self {
            parser,
            bigram_min_len: config.bigram_min_len,
            trigram_min_len: config.trigram_min_len,
        }
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Blocks for a user-supplied address: tokens, bigrams and compound phrases.
    pub fn extract_provided_blocks(&self, address: &str) -> BlockSet {
        let tokens = self.parser.tokenize(address);
        let mut blocks = BlockSet::new();

        blocks.extend(tokens.iter().cloned());
        self.push_joined_ngrams(&tokens, 2, self.bigram_min_len, &mut blocks);
        self.push_compound_blocks(address, &mut blocks);

        let blocks = retain_valid(blocks);
        debug!("extracted {} provided blocks from {} tokens", blocks.len(), tokens.len());
        blocks
    }

    /// Blocks for OCR text: everything a provided address yields plus
    /// trigrams and whole keyword-dense lines.
    ///
    /// Text blocks also carry the letter and digit runs of tokens that glue
    /// a word to a number ("plot45" adds "plot" and "45"). Provided blocks
    /// never do, so a text block set is a superset of what the token,
    /// n-gram and compound strategies alone produce.
    pub fn extract_text_blocks(&self, text: &str) -> BlockSet {
        let tokens = self.parser.tokenize(text);
        let mut blocks = BlockSet::new();

        blocks.extend(tokens.iter().cloned());
        push_glued_parts(&tokens, &mut blocks);
        self.push_joined_ngrams(&tokens, 2, self.bigram_min_len, &mut blocks);
        self.push_joined_ngrams(&tokens, 3, self.trigram_min_len, &mut blocks);
        self.push_compound_blocks(text, &mut blocks);
        self.push_keyword_lines(text, &mut blocks);

        let blocks = retain_valid(blocks);
        debug!("extracted {} text blocks from {} tokens", blocks.len(), tokens.len());
        blocks
    }

    // Adjacent tokens joined without a separator, kept when longer than min_len chars.
    // Lets "lekki peninsula" meet OCR output such as "lekkipeninsula".
    fn push_joined_ngrams(&self, tokens: &[String], size: usize, min_len: usize, blocks: &mut BlockSet) {
        if size == 0 || tokens.len() < size {
            return;
        }
        for window in tokens.windows(size) {
            let joined: String = window.concat();
            if joined.chars().count() > min_len {
                blocks.insert(joined);
            }
        }
    }

    // Compound rules run against the raw input, before tokenization splits the idiom.
    fn push_compound_blocks(&self, raw: &str, blocks: &mut BlockSet) {
        for rule in COMPOUND_RULES.iter() {
            for hit in rule.pattern.find_iter(raw) {
                let block = self.parser.normalize_for_matching(hit.as_str());
                trace!("compound rule '{}' produced block '{}'", rule.name, block);
                blocks.insert(block);
            }
        }
    }

    fn push_keyword_lines(&self, raw: &str, blocks: &mut BlockSet) {
        for line in raw.lines() {
            let normalized = self.parser.normalize(line);
            if keyword_hits(&normalized) >= 2 {
                trace!("keyword line kept as block: '{}'", normalized);
                blocks.insert(compact(&normalized));
            }
        }
    }
}

// OCR often drops the space between a word and a number ("plot45").
// Such tokens also contribute their letter runs and digit runs.
fn push_glued_parts(tokens: &[String], blocks: &mut BlockSet) {
    for token in tokens {
        let has_alpha = token.chars().any(char::is_alphabetic);
        let has_digit = token.chars().any(|c| c.is_numeric());
        if !(has_alpha && has_digit) {
            continue;
        }

        let mut run = String::new();
        let mut run_is_digit = false;
        for c in token.chars() {
            let is_digit = c.is_numeric();
            if !run.is_empty() && is_digit != run_is_digit {
                blocks.insert(std::mem::take(&mut run));
            }
            run_is_digit = is_digit;
            run.push(c);
        }
        if !run.is_empty() {
            blocks.insert(run);
        }
    }
}

fn retain_valid(blocks: BlockSet) -> BlockSet {
    blocks.into_iter().filter(|b| b.chars().count() > 1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::AddressParser;

    fn extractor() -> BlockExtractor<AddressParser> {
        BlockExtractor::new(AddressParser::new_with_defaults(), &MatcherConfig::default())
    }

    #[test]
    fn provided_blocks_include_tokens_bigrams_and_compounds() {
        let blocks = extractor().extract_provided_blocks(
            "Plot 45, Block C, Lekki Peninsula Residential Scheme, Eti Osa, Lagos",
        );
        for expected in [
            "plot", "45", "block", "lekki", "peninsula", "residential", "scheme", "eti", "osa", "lagos",
            "plot45", "lekkipeninsula", "residentialscheme", "etiosa", "osalagos", "blockc",
        ] {
            assert!(blocks.contains(expected), "missing block {}", expected);
        }
        // single-char tokens never become blocks
        assert!(!blocks.contains("c"));
        // blocks never contain whitespace
        assert!(blocks.iter().all(|b| !b.contains(' ')));
    }

    #[test]
    fn short_bigrams_are_skipped() {
        // "ab" + "cd" is only 4 chars, not more than the bigram minimum
        let blocks = extractor().extract_provided_blocks("ab cd");
        assert!(!blocks.contains("abcd"));
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn provided_blocks_have_no_trigrams() {
        let blocks = extractor().extract_provided_blocks("adelabu street surulere");
        assert!(blocks.contains("adelabustreet"));
        assert!(!blocks.contains("adelabustreetsurulere"));
    }

    #[test]
    fn text_blocks_include_trigrams_and_keyword_lines() {
        let text = "IKEJA ELECTRIC\n\
                    PLOT45 BLOCKC LEKKI PENINSULA RESIDENTIAL SCHEME ETIOSA LAGOS\n\
                    Lekki phase one office\n\
                    Customer care line Lagos";
        let blocks = extractor().extract_text_blocks(text);

        assert!(blocks.contains("plot45"));
        assert!(blocks.contains("blockc"));
        assert!(blocks.contains("lekkipeninsularesidential"));
        assert!(blocks.contains("plot45blockclekkipeninsularesidentialschemeetiosalagos"));
        assert!(blocks.contains("lekkiphaseoneoffice"));
        // one keyword is not enough for a line block
        assert!(!blocks.contains("customercarelinelagos"));
    }

    #[test]
    fn glued_tokens_are_split_in_text_only() {
        let text_blocks = extractor().extract_text_blocks("PLOT45 BLOCKC 12b");
        for expected in ["plot45", "plot", "45", "12b", "12"] {
            assert!(text_blocks.contains(expected), "missing block {}", expected);
        }
        // the lone "b" run is too short to keep
        assert!(!text_blocks.contains("b"));

        let provided = extractor().extract_provided_blocks("Plot45");
        assert!(!provided.contains("plot"));
    }

    #[test]
    fn empty_input_yields_no_blocks() {
        assert!(extractor().extract_provided_blocks("").is_empty());
        assert!(extractor().extract_text_blocks("").is_empty());
        assert!(extractor().extract_text_blocks("?!  ...").is_empty());
    }
}
