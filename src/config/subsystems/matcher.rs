// src/config/subsystems/matcher.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::{FromIni, parse_positive, parse_score, parse_unit_interval};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    Exact,
    Substring,
    Levenshtein,
    JaroWinkler,
    Phonetic,
}

impl SimilarityMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityMetric::Exact => "exact",
            SimilarityMetric::Substring => "substring",
            SimilarityMetric::Levenshtein => "levenshtein",
            SimilarityMetric::JaroWinkler => "jaro_winkler",
            SimilarityMetric::Phonetic => "phonetic",
        }
    }

    pub fn all() -> [SimilarityMetric; 5] {
        [
            SimilarityMetric::Exact,
            SimilarityMetric::Substring,
            SimilarityMetric::Levenshtein,
            SimilarityMetric::JaroWinkler,
            SimilarityMetric::Phonetic,
        ]
    }
}

/// Per-metric weights of the combined block similarity. Must sum to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityWeights {
    pub exact: f64,
    pub substring: f64,
    pub levenshtein: f64,
    pub jaro_winkler: f64,
    pub phonetic: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            exact: 0.40,
            substring: 0.25,
            levenshtein: 0.15,
            jaro_winkler: 0.15,
            phonetic: 0.05,
        }
    }
}

impl SimilarityWeights {
    pub fn weight(&self, metric: SimilarityMetric) -> f64 {
        match metric {
            SimilarityMetric::Exact => self.exact,
            SimilarityMetric::Substring => self.substring,
            SimilarityMetric::Levenshtein => self.levenshtein,
            SimilarityMetric::JaroWinkler => self.jaro_winkler,
            SimilarityMetric::Phonetic => self.phonetic,
        }
    }

    pub fn total(&self) -> f64 {
        SimilarityMetric::all().iter().map(|m| self.weight(*m)).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmConfig {
    // Substring containment only counts when the shorter side has this many chars
    pub substring_min_len: usize,
    // Score returned when two words are variants of the same phonetic group
    pub phonetic_score: f64,
    // Winkler prefix scaling and cap
    pub winkler_prefix_scale: f64,
    pub winkler_max_prefix: usize,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            substring_min_len: 3,
            phonetic_score: 0.9,
            winkler_prefix_scale: 0.1,
            winkler_max_prefix: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    // Block extraction
    pub bigram_min_len: usize,
    pub trigram_min_len: usize,

    // A provided block is accepted when its best similarity reaches this
    pub block_accept_threshold: f64,

    // Match type boundaries on the combined score
    pub exact_type_min: f64,
    pub fuzzy_type_min: f64,

    // Volume floors for the block-derived address score
    pub strong_match_count: usize,
    pub strong_match_floor: f64,
    pub moderate_match_count: usize,
    pub moderate_match_floor: f64,

    // Strong volume plus a block score above this confirms the address outright
    pub confirm_block_score: f64,

    // Fuzzy verdict thresholds (fractions of 100)
    pub strong_fuzzy_threshold: f64,
    pub default_fuzzy_threshold: f64,

    // Token window for the verbatim phrase gate
    pub strict_ngram_window: usize,

    pub weights: SimilarityWeights,
    pub algorithm_config: AlgorithmConfig,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            bigram_min_len: 4,
            trigram_min_len: 6,
            block_accept_threshold: 0.70,
            exact_type_min: 0.95,
            fuzzy_type_min: 0.80,
            strong_match_count: 5,
            strong_match_floor: 85.0,
            moderate_match_count: 3,
            moderate_match_floor: 75.0,
            confirm_block_score: 0.75,
            strong_fuzzy_threshold: 0.85,
            default_fuzzy_threshold: 0.75,
            strict_ngram_window: 5,
            weights: SimilarityWeights::default(),
            algorithm_config: AlgorithmConfig::default(),
        }
    }
}

impl FromIni for MatcherConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if !section_name.starts_with("matcher") {
            return None;
        }

        match (section_name, key) {
            ("matcher", "bigram_min_len") => Some(parse_positive(key, value).map(|v| {
                self.bigram_min_len = v;
            })),
            ("matcher", "trigram_min_len") => Some(parse_positive(key, value).map(|v| {
                self.trigram_min_len = v;
            })),
            ("matcher", "block_accept_threshold") => Some(parse_unit_interval(key, value).map(|v| {
                self.block_accept_threshold = v;
            })),
            ("matcher", "exact_type_min") => Some(parse_unit_interval(key, value).map(|v| {
                self.exact_type_min = v;
            })),
            ("matcher", "fuzzy_type_min") => Some(parse_unit_interval(key, value).map(|v| {
                self.fuzzy_type_min = v;
            })),
            ("matcher", "strong_match_count") => Some(parse_positive(key, value).map(|v| {
                self.strong_match_count = v;
            })),
            ("matcher", "strong_match_floor") => Some(parse_score(key, value).map(|v| {
                self.strong_match_floor = v;
            })),
            ("matcher", "moderate_match_count") => Some(parse_positive(key, value).map(|v| {
                self.moderate_match_count = v;
            })),
            ("matcher", "moderate_match_floor") => Some(parse_score(key, value).map(|v| {
                self.moderate_match_floor = v;
            })),
            ("matcher", "confirm_block_score") => Some(parse_unit_interval(key, value).map(|v| {
                self.confirm_block_score = v;
            })),
            ("matcher", "strong_fuzzy_threshold") => Some(parse_unit_interval(key, value).map(|v| {
                self.strong_fuzzy_threshold = v;
            })),
            ("matcher", "default_fuzzy_threshold") => Some(parse_unit_interval(key, value).map(|v| {
                self.default_fuzzy_threshold = v;
            })),
            ("matcher", "strict_ngram_window") => Some(parse_positive(key, value).map(|v| {
                self.strict_ngram_window = v;
            })),

            ("matcher.weights", "exact") => Some(parse_unit_interval(key, value).map(|v| {
                self.weights.exact = v;
            })),
            ("matcher.weights", "substring") => Some(parse_unit_interval(key, value).map(|v| {
                self.weights.substring = v;
            })),
            ("matcher.weights", "levenshtein") => Some(parse_unit_interval(key, value).map(|v| {
                self.weights.levenshtein = v;
            })),
            ("matcher.weights", "jaro_winkler") => Some(parse_unit_interval(key, value).map(|v| {
                self.weights.jaro_winkler = v;
            })),
            ("matcher.weights", "phonetic") => Some(parse_unit_interval(key, value).map(|v| {
                self.weights.phonetic = v;
            })),

            ("matcher.algorithm", "substring_min_len") => Some(parse_positive(key, value).map(|v| {
                self.algorithm_config.substring_min_len = v;
            })),
            ("matcher.algorithm", "phonetic_score") => Some(parse_unit_interval(key, value).map(|v| {
                self.algorithm_config.phonetic_score = v;
            })),
            ("matcher.algorithm", "winkler_prefix_scale") => {
                match value.parse::<f64>() {
                    Ok(scale) if (0.0..=0.25).contains(&scale) => {
                        self.algorithm_config.winkler_prefix_scale = scale;
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid winkler_prefix_scale (must be between 0 and 0.25): {}", value)
                    ))),
                }
            },
            ("matcher.algorithm", "winkler_max_prefix") => Some(parse_positive(key, value).map(|v| {
                self.algorithm_config.winkler_max_prefix = v;
            })),

            // Unknown key
            _ => None,
        }
    }
}

impl MatcherConfig {
    pub fn validate(&self) -> Result<()> {
        if self.strict_ngram_window == 0 {
            return Err(Error::Config(
                "strict_ngram_window must be greater than 0".to_string()
            ));
        }
        if self.moderate_match_count > self.strong_match_count {
            return Err(Error::Config(
                "moderate_match_count must not exceed strong_match_count".to_string()
            ));
        }
        if self.fuzzy_type_min > self.exact_type_min {
            return Err(Error::Config(
                "fuzzy_type_min must not exceed exact_type_min".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.block_accept_threshold) {
            return Err(Error::Config(
                "block_accept_threshold must be between 0 and 1".to_string()
            ));
        }
        if SimilarityMetric::all().iter().any(|m| self.weights.weight(*m) < 0.0) {
            return Err(Error::Config(
                "similarity weights must not be negative".to_string()
            ));
        }
        let total = self.weights.total();
        if (total - 1.0).abs() > 1e-6 {
            return Err(Error::Config(
                format!("similarity weights must sum to 1.0, got {:.4}", total)
            ));
        }
        // The jaro-winkler boost stays inside [0, 1] only under this bound
        let max_boost = self.algorithm_config.winkler_prefix_scale
            * self.algorithm_config.winkler_max_prefix as f64;
        if max_boost > 1.0 {
            return Err(Error::Config(
                "winkler_prefix_scale * winkler_max_prefix must not exceed 1".to_string()
            ));
        }
        Ok(())
    }
}
