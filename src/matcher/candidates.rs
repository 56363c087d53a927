// src/matcher/candidates.rs
//
// Address-like fragments of OCR text, reported for review only.

use ahash::AHashSet;
use log::trace;

use crate::parser::patterns::{keyword_hits, CANDIDATE_RULES};
use crate::parser::TextParser;

/// Lines with at least this many address keywords count as candidates.
const MIN_KEYWORD_HITS: usize = 2;

/// Collects address-like substrings of `text`, trimmed and deduplicated in
/// the order they were first found.
pub fn find_address_candidates<P: TextParser>(text: &str, parser: &P) -> Vec<String> {
    let mut seen = AHashSet::new();
    let mut found = Vec::new();

    let mut push = |candidate: &str, source: &str| {
        let candidate = candidate.trim().trim_end_matches(|c: char| c == ',' || c == ';').trim();
        if candidate.is_empty() {
            return;
        }
        if seen.insert(candidate.to_string()) {
            trace!("address candidate from {}: '{}'", source, candidate);
            found.push(candidate.to_string());
        }
    };

    for rule in CANDIDATE_RULES.iter() {
        for hit in rule.pattern.find_iter(text) {
            push(hit.as_str(), rule.name);
        }
    }

    for line in text.lines() {
        if keyword_hits(&parser.normalize(line)) >= MIN_KEYWORD_HITS {
            push(line, "keyword_line");
        }
    }

    found
}
