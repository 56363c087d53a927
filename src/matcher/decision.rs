// src/matcher/decision.rs
//
// Turns block evidence and the verbatim phrase gate into address verdicts.

use log::debug;

use crate::config::MatcherConfig;
use crate::ngram::{strict_ngram_match, supports_strict_gate};
use super::types::{AddressDecision, BlockMatchReport};

pub struct AddressDecider {
    config: MatcherConfig,
}

/// Block-derived part of the decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyVerdict {
    pub final_score: f64,
    pub confirmed: bool,
    pub matched: bool,
}

impl AddressDecider {
    pub fn new(config: &MatcherConfig) -> Self {
        Self { config: config.clone() }
    }

    /// Applies the volume floors and the confirmation rule to a block score.
    pub fn fuzzy_verdict(&self, block_score: f64, total_matches: usize) -> FuzzyVerdict {
        let cfg = &self.config;
        let address_score = (block_score * 100.0).clamp(0.0, 100.0);

        let mut final_score = if total_matches >= cfg.strong_match_count {
            address_score.max(cfg.strong_match_floor)
        } else if total_matches >= cfg.moderate_match_count {
            address_score.max(cfg.moderate_match_floor)
        } else {
            address_score
        };

        let confirmed = total_matches >= cfg.strong_match_count && block_score > cfg.confirm_block_score;
        if confirmed {
            final_score = 100.0;
        }

        let threshold = if total_matches >= cfg.strong_match_count {
            cfg.strong_fuzzy_threshold
        } else {
            cfg.default_fuzzy_threshold
        };

        FuzzyVerdict {
            final_score,
            confirmed,
            matched: final_score >= threshold * 100.0,
        }
    }

    pub fn decide(
        &self,
        normalized_address: &str,
        normalized_text: &str,
        report: &BlockMatchReport,
    ) -> AddressDecision {
        let fuzzy = self.fuzzy_verdict(report.block_score, report.total_matches);
        let window = self.config.strict_ngram_window;

        let (strict, matched_ngram) = if supports_strict_gate(normalized_address, window) {
            let ngram = strict_ngram_match(normalized_address, normalized_text, window);
            (ngram.is_some(), ngram)
        } else {
            debug!("address shorter than {} words, strict verdict follows fuzzy verdict", window);
            (fuzzy.matched, None)
        };

        debug!(
            "address decision: score {:.1}, fuzzy {}, strict {}, confirmed {}",
            fuzzy.final_score, fuzzy.matched, strict, fuzzy.confirmed
        );

        AddressDecision {
            address_matched: strict,
            fuzzy_address_matched: fuzzy.matched,
            strict_address_matched: strict,
            final_score: fuzzy.final_score,
            confirmed: fuzzy.confirmed,
            matched_ngram,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decider() -> AddressDecider {
        AddressDecider::new(&MatcherConfig::default())
    }

    fn report(block_score: f64, total_matches: usize) -> BlockMatchReport {
        BlockMatchReport {
            block_score,
            total_matches,
            ..BlockMatchReport::default()
        }
    }

    #[test]
    fn volume_floors() {
        let d = decider();
        assert_eq!(d.fuzzy_verdict(0.2, 2).final_score, 20.0);
        assert_eq!(d.fuzzy_verdict(0.2, 3).final_score, 75.0);
        assert_eq!(d.fuzzy_verdict(0.2, 5).final_score, 85.0);
        assert_eq!(d.fuzzy_verdict(0.9, 3).final_score, 90.0);
    }

    #[test]
    fn confirmation_forces_full_score() {
        let d = decider();
        let v = d.fuzzy_verdict(0.76, 5);
        assert!(v.confirmed);
        assert_eq!(v.final_score, 100.0);

        // exactly at the bound is not enough
        let v = d.fuzzy_verdict(0.75, 5);
        assert!(!v.confirmed);
        assert_eq!(v.final_score, 85.0);
    }

    #[test]
    fn more_matches_never_lower_the_score() {
        let d = decider();
        for score in [0.0, 0.3, 0.76, 0.8, 1.0] {
            let mut previous = 0.0;
            for total in 0..10 {
                let current = d.fuzzy_verdict(score, total).final_score;
                assert!(current >= previous, "score {} dropped at {} matches", score, total);
                previous = current;
            }
        }
        assert!(d.fuzzy_verdict(0.8, 5).final_score >= d.fuzzy_verdict(0.8, 4).final_score);
    }

    #[test]
    fn fuzzy_threshold_adapts_to_volume() {
        let d = decider();
        assert!(!d.fuzzy_verdict(0.74, 2).matched);
        assert!(d.fuzzy_verdict(0.75, 2).matched);
        assert!(d.fuzzy_verdict(0.1, 3).matched); // floor 75 meets 0.75
        assert!(d.fuzzy_verdict(0.1, 5).matched); // floor 85 meets 0.85
    }

    #[test]
    fn strict_gate_is_binding_for_long_addresses() {
        let d = decider();
        let address = "15 adelabu street surulere lagos";

        let decision = d.decide(address, "bill to 15 adelabu street surulere lagos", &report(0.1, 0));
        assert!(decision.address_matched);
        assert!(!decision.fuzzy_address_matched);
        assert_eq!(decision.matched_ngram.as_deref(), Some(address));

        let decision = d.decide(address, "adelabu lagos street 15 surulere", &report(0.9, 8));
        assert!(!decision.address_matched);
        assert!(decision.fuzzy_address_matched);
        assert_eq!(decision.matched_ngram, None);
    }

    #[test]
    fn short_addresses_fall_back_to_fuzzy() {
        let d = decider();
        for (score, total) in [(0.9, 2), (0.3, 1), (0.8, 6), (0.0, 0)] {
            let decision = d.decide("lekki lagos", "lekki lagos", &report(score, total));
            assert_eq!(decision.strict_address_matched, decision.fuzzy_address_matched);
            assert_eq!(decision.address_matched, decision.fuzzy_address_matched);
            assert_eq!(decision.matched_ngram, None);
        }
    }
}
