// src/matcher/blocks.rs

use log::debug;

use crate::config::MatcherConfig;
use crate::ngram::{BlockExtractor, BlockSet};
use crate::parser::AddressParser;
use super::similarity::SimilarityCalculator;
use super::types::{BlockMatch, BlockMatchReport};

/// Pairs every provided block with its best extracted block and scores the set.
pub struct BlockMatcher {
    extractor: BlockExtractor<AddressParser>,
    calculator: SimilarityCalculator,
    accept_threshold: f64,
}

impl BlockMatcher {
    pub fn new(config: &MatcherConfig, parser: AddressParser) -> Self {
        Self {
            extractor: BlockExtractor::new(parser, config),
            calculator: SimilarityCalculator::new(config),
            accept_threshold: config.block_accept_threshold,
        }
    }

    pub fn extractor(&self) -> &BlockExtractor<AddressParser> {
        &self.extractor
    }

    pub fn calculator(&self) -> &SimilarityCalculator {
        &self.calculator
    }

    pub fn match_blocks(&self, provided_address: &str, extracted_text: &str) -> BlockMatchReport {
        let provided_blocks = self.extractor.extract_provided_blocks(provided_address);
        let extracted_blocks = self.extractor.extract_text_blocks(extracted_text);
        self.match_block_sets(provided_blocks, extracted_blocks)
    }

    pub fn match_block_sets(&self, provided_blocks: BlockSet, extracted_blocks: BlockSet) -> BlockMatchReport {
        let mut matched_blocks = Vec::new();

        for provided in &provided_blocks {
            let Some((best, similarity)) = self.best_candidate(provided, &extracted_blocks) else {
                continue;
            };
            if similarity >= self.accept_threshold {
                matched_blocks.push(BlockMatch {
                    provided: provided.clone(),
                    matched: best.to_string(),
                    similarity,
                    match_type: self.calculator.classify(similarity),
                });
            }
        }

        let block_score = if provided_blocks.is_empty() {
            0.0
        } else {
            let accepted: f64 = matched_blocks.iter().map(|m| m.similarity).sum();
            (accepted / provided_blocks.len() as f64).clamp(0.0, 1.0)
        };

        debug!(
            "block matching: {}/{} provided blocks accepted against {} extracted, score {:.3}",
            matched_blocks.len(),
            provided_blocks.len(),
            extracted_blocks.len(),
            block_score
        );

        BlockMatchReport {
            total_matches: matched_blocks.len(),
            matched_blocks,
            block_score,
            provided_blocks,
            extracted_blocks,
        }
    }

    // Ties keep the first candidate in set order.
    fn best_candidate<'a>(&self, provided: &str, extracted: &'a BlockSet) -> Option<(&'a str, f64)> {
        let mut best: Option<(&'a str, f64)> = None;
        for candidate in extracted {
            let similarity = self.calculator.combined(provided, candidate);
            if best.map_or(true, |(_, s)| similarity > s) {
                best = Some((candidate.as_str(), similarity));
                if similarity >= 1.0 {
                    break;
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::types::MatchType;

    fn matcher() -> BlockMatcher {
        BlockMatcher::new(&MatcherConfig::default(), AddressParser::new_with_defaults())
    }

    #[test]
    fn empty_address_scores_zero() {
        let report = matcher().match_blocks("", "15 adelabu street surulere lagos");
        assert!(report.provided_blocks.is_empty());
        assert_eq!(report.block_score, 0.0);
        assert_eq!(report.total_matches, 0);
    }

    #[test]
    fn empty_text_accepts_nothing() {
        let report = matcher().match_blocks("15 Adelabu Street Surulere Lagos", "");
        assert!(!report.provided_blocks.is_empty());
        assert!(report.extracted_blocks.is_empty());
        assert_eq!(report.total_matches, 0);
        assert_eq!(report.block_score, 0.0);
    }

    #[test]
    fn unmatched_blocks_drag_the_score_down() {
        let report = matcher().match_blocks("adelabu surulere", "adelabu ikoyi");
        // blocks: adelabu, surulere, adelabusurulere
        assert_eq!(report.provided_blocks.len(), 3);
        let adelabu = report.matched_blocks.iter().find(|m| m.provided == "adelabu").unwrap();
        assert_eq!(adelabu.similarity, 1.0);
        assert_eq!(adelabu.match_type, MatchType::Exact);
        assert!(report.block_score < 1.0);
        assert!(report.block_score >= 1.0 / 3.0);
    }

    #[test]
    fn acceptance_threshold_is_respected() {
        let report = matcher().match_blocks("lekki", "lagos");
        assert_eq!(report.total_matches, 0);
        for m in &matcher().match_blocks("lekki peninsula", "lekkipeninsula estate").matched_blocks {
            assert!(m.similarity >= 0.70);
        }
    }

    #[test]
    fn run_together_ocr_still_matches() {
        let report = matcher().match_blocks("Lekki Peninsula", "LEKKIPENINSULA");
        let joined = report
            .matched_blocks
            .iter()
            .find(|m| m.provided == "lekkipeninsula")
            .unwrap();
        assert_eq!(joined.matched, "lekkipeninsula");
        assert_eq!(joined.match_type, MatchType::Exact);
    }
}
