use log::trace;

use crate::config::subsystems::matcher::{MatcherConfig, SimilarityMetric, SimilarityWeights};
use super::algorithms::{SimilarityAlgorithm, SimilarityAlgorithmFactory};
use super::types::MatchType;

/// Weighted blend of the individual block metrics.
pub struct SimilarityCalculator {
    weights: SimilarityWeights,
    exact: Box<dyn SimilarityAlgorithm>,
    graded: Vec<Box<dyn SimilarityAlgorithm>>,
    exact_type_min: f64,
    fuzzy_type_min: f64,
}

impl SimilarityCalculator {
    pub fn new(config: &MatcherConfig) -> Self {
        let algorithms = &config.algorithm_config;
        let graded = SimilarityMetric::all()
            .into_iter()
            .filter(|m| *m != SimilarityMetric::Exact)
            .map(|m| SimilarityAlgorithmFactory::create(m, algorithms))
            .collect();

        Self {
            weights: config.weights.clone(),
            exact: SimilarityAlgorithmFactory::create(SimilarityMetric::Exact, algorithms),
            graded,
            exact_type_min: config.exact_type_min,
            fuzzy_type_min: config.fuzzy_type_min,
        }
    }

    /// Combined similarity in [0, 1]. An exact match saturates at 1.0.
    pub fn combined(&self, source: &str, target: &str) -> f64 {
        let exact = self.exact.compare(source, target);
        if exact >= 1.0 {
            return 1.0;
        }

        let mut score = self.weights.exact * exact;
        for algorithm in &self.graded {
            let s = algorithm.compare(source, target);
            score += self.weights.weight(algorithm.name()) * s;
        }

        let score = if score.is_finite() { score.clamp(0.0, 1.0) } else { 0.0 };
        trace!("combined('{}', '{}') = {:.3}", source, target, score);
        score
    }

    pub fn classify(&self, score: f64) -> MatchType {
        if score >= self.exact_type_min {
            MatchType::Exact
        } else if score >= self.fuzzy_type_min {
            MatchType::Fuzzy
        } else {
            MatchType::Partial
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator() -> SimilarityCalculator {
        SimilarityCalculator::new(&MatcherConfig::default())
    }

    #[test]
    fn identical_blocks_saturate() {
        let calc = calculator();
        for block in ["lekki", "45", "plot45", "surulere", "ab"] {
            assert_eq!(calc.combined(block, block), 1.0);
        }
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let calc = calculator();
        let samples = ["", "a", "lekki", "leki", "penisula", "peninsula", "plot45", "ÉTIOSA", "4500"];
        for a in samples {
            for b in samples {
                let s = calc.combined(a, b);
                assert!((0.0..=1.0).contains(&s), "{} vs {} gave {}", a, b, s);
            }
        }
    }

    #[test]
    fn spelling_variant_scores_below_acceptance() {
        let calc = calculator();
        // not folded, not contained; edit distance, prefix and phonetic family carry it
        let s = calc.combined("residentail", "residential");
        assert!(s > 0.2 && s < 0.7, "got {}", s);
    }

    #[test]
    fn containment_is_rewarded() {
        let calc = calculator();
        let contained = calc.combined("lekkipeninsula", "lekkipeninsularesidential");
        let unrelated = calc.combined("lekkipeninsula", "surulerelagos");
        assert!(contained > unrelated);
    }

    #[test]
    fn classification_boundaries() {
        let calc = calculator();
        assert_eq!(calc.classify(1.0), MatchType::Exact);
        assert_eq!(calc.classify(0.95), MatchType::Exact);
        assert_eq!(calc.classify(0.9), MatchType::Fuzzy);
        assert_eq!(calc.classify(0.8), MatchType::Fuzzy);
        assert_eq!(calc.classify(0.75), MatchType::Partial);
    }
}
