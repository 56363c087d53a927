// Address text normalization for OCR output and user-typed addresses

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use crate::config::subsystems::ParserConfig;

use super::patterns::FOLD_RULES;
use super::TextParser;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\p{L}\p{N}\s]").unwrap();
    static ref NON_LETTER: Regex = Regex::new(r"[^\p{L}\s]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

#[derive(Debug, Clone)]
pub struct AddressParser {
    settings: ParserConfig,
}

impl AddressParser {
    pub fn new(settings: ParserConfig) -> Self {
        Self { settings }
    }

    pub fn new_with_defaults() -> Self {
        Self::new(ParserConfig::default())
    }

    pub fn settings(&self) -> &ParserConfig {
        &self.settings
    }

    fn fold_misspellings(&self, text: String) -> String {
        if !self.settings.fold_misspellings {
            return text;
        }

        let mut folded = text;
        for rule in FOLD_RULES.iter() {
            if rule.pattern.is_match(&folded) {
                trace!("fold rule '{}' applied", rule.name);
                folded = rule.pattern.replace_all(&folded, rule.canonical).into_owned();
            }
        }
        folded
    }
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

impl TextParser for AddressParser {
    fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let stripped = NON_WORD.replace_all(&lowered, " ").into_owned();
        let folded = self.fold_misspellings(stripped);
        collapse_whitespace(&folded)
    }

    fn normalize_name(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        collapse_whitespace(&NON_LETTER.replace_all(&lowered, " "))
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .split(|c: char| c.is_whitespace() || c == ',')
            .map(|token| token.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
            .filter(|token| token.chars().count() >= self.settings.min_token_len)
            .collect()
    }
}
