// src/matcher/name.rs

use log::debug;

use crate::config::NameConfig;
use crate::parser::{AddressParser, TextParser};
use super::algorithms::levenshtein_similarity;
use super::types::NameMatch;

/// Looks for a person's name in OCR text, tolerating reordering and
/// small misreads of individual name parts.
pub struct NameMatcher {
    parser: AddressParser,
    threshold: f64,
}

impl NameMatcher {
    pub fn new(config: &NameConfig, parser: AddressParser) -> Self {
        Self {
            parser,
            threshold: config.match_threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn match_name(&self, full_name: &str, text: &str) -> NameMatch {
        let name = self.parser.normalize_name(full_name);
        if name.is_empty() {
            return NameMatch::none();
        }

        let text = self.parser.normalize_name(text);
        if text.contains(&name) {
            debug!("name found verbatim in text");
            return NameMatch { matched: true, score: 100, ratio: 1.0 };
        }

        let text_tokens: Vec<&str> = text.split_whitespace().collect();
        if text_tokens.is_empty() {
            return NameMatch::none();
        }

        let name_tokens: Vec<&str> = name.split_whitespace().collect();
        let total: f64 = name_tokens
            .iter()
            .map(|token| {
                text_tokens
                    .iter()
                    .map(|candidate| levenshtein_similarity(token, candidate))
                    .fold(0.0, f64::max)
            })
            .sum();

        let ratio = (total / name_tokens.len() as f64).clamp(0.0, 1.0);
        let result = NameMatch {
            matched: ratio >= self.threshold,
            score: (ratio * 100.0).round() as u8,
            ratio,
        };
        debug!(
            "name match: {} tokens, ratio {:.3}, matched {}",
            name_tokens.len(),
            ratio,
            result.matched
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> NameMatcher {
        NameMatcher::new(&NameConfig::default(), AddressParser::new_with_defaults())
    }

    #[test]
    fn empty_name_never_matches() {
        assert_eq!(matcher().match_name("", "john okafor"), NameMatch::none());
        assert_eq!(matcher().match_name(" 123 -- ", "john okafor"), NameMatch::none());
    }

    #[test]
    fn verbatim_name_scores_full() {
        let m = matcher().match_name("John Okafor", "Received from: JOHN OKAFOR, Lagos");
        assert!(m.matched);
        assert_eq!(m.score, 100);
        assert_eq!(m.ratio, 1.0);
    }

    #[test]
    fn partial_name_above_threshold() {
        // adeyemi has no close token in the text
        let m = matcher().match_name("John Adeyemi Okafor", "john okafor");
        assert!(m.matched);
        assert_eq!(m.score, 67);
    }

    #[test]
    fn half_name_below_threshold() {
        let m = matcher().match_name("Ada Xyz", "ada");
        assert!(!m.matched);
        assert_eq!(m.score, 50);
        assert!((m.ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn misread_characters_are_tolerated() {
        let m = matcher().match_name("Chinedu Okafor", "chinedu okafer");
        assert!(m.matched);
        assert!(m.score > 80 && m.score < 100);
    }

    #[test]
    fn text_without_letters_scores_zero() {
        assert_eq!(matcher().match_name("John Okafor", "12345 --- 678"), NameMatch::none());
    }

    #[test]
    fn threshold_is_configurable() {
        let strict = NameMatcher::new(&NameConfig { match_threshold: 0.7 }, AddressParser::new_with_defaults());
        let m = strict.match_name("John Adeyemi Okafor", "john okafor");
        assert!(!m.matched);
        assert_eq!(m.score, 67);
    }
}
