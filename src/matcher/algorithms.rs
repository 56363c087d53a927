use crate::config::subsystems::matcher::{AlgorithmConfig, SimilarityMetric};
use crate::parser::compact;
use crate::parser::patterns::phonetic_group;

/// The SimilarityAlgorithm trait defines the interface for comparing two blocks.
/// All similarity scores are normalized between 0.0 (completely different) and 1.0 (identical),
/// and every implementation is total: no input makes it fail or return NaN.
pub trait SimilarityAlgorithm: Send + Sync {
    /// Returns the type of similarity metric this algorithm implements
    fn name(&self) -> SimilarityMetric;

    /// Compares two strings and returns their similarity score
    fn compare(&self, source: &str, target: &str) -> f64;
}

/// ExactMatcher scores 1.0 when two non-empty blocks are identical.
/// Blocks arrive normalized and compacted from extraction, so no further
/// cleaning happens here.
pub struct ExactMatcher;

impl SimilarityAlgorithm for ExactMatcher {
    fn name(&self) -> SimilarityMetric {
        SimilarityMetric::Exact
    }

    #[inline]
    fn compare(&self, source: &str, target: &str) -> f64 {
        if !source.is_empty() && source == target { 1.0 } else { 0.0 }
    }
}

/// SubstringMatcher rewards one string containing the other, scaled by how
/// much of the longer string the shorter one covers.
pub struct SubstringMatcher {
    min_len: usize,
}

impl SubstringMatcher {
    pub fn with_config(min_len: usize) -> Self {
        Self { min_len }
    }
}

impl SimilarityAlgorithm for SubstringMatcher {
    fn name(&self) -> SimilarityMetric {
        SimilarityMetric::Substring
    }

    fn compare(&self, source: &str, target: &str) -> f64 {
        let source_len = source.chars().count();
        let target_len = target.chars().count();

        let ((shorter, shorter_len), (longer, longer_len)) = if source_len <= target_len {
            ((source, source_len), (target, target_len))
        } else {
            ((target, target_len), (source, source_len))
        };

        if shorter_len < self.min_len || shorter_len == 0 {
            return 0.0;
        }
        if longer.contains(shorter) {
            shorter_len as f64 / longer_len as f64
        } else {
            0.0
        }
    }
}

/// Edit distance over chars, computed with two rolling rows.
pub fn levenshtein_distance(source: &str, target: &str) -> usize {
    let source_chars: Vec<char> = source.chars().collect();
    let target_chars: Vec<char> = target.chars().collect();

    if source_chars.is_empty() {
        return target_chars.len();
    }
    if target_chars.is_empty() {
        return source_chars.len();
    }

    let mut previous: Vec<usize> = (0..=target_chars.len()).collect();
    let mut current = vec![0; target_chars.len() + 1];

    for (i, sc) in source_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, tc) in target_chars.iter().enumerate() {
            let cost = if sc == tc { 0 } else { 1 };
            current[j + 1] = (previous[j + 1] + 1)    // deletion
                .min(current[j] + 1)                  // insertion
                .min(previous[j] + cost);             // substitution
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[target_chars.len()]
}

/// `1 - distance / max_len`; two empty strings are identical.
pub fn levenshtein_similarity(source: &str, target: &str) -> f64 {
    let max_len = source.chars().count().max(target.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein_distance(source, target) as f64 / max_len as f64
}

/// LevenshteinMatcher implements similarity based on edit distance.
pub struct LevenshteinMatcher;

impl SimilarityAlgorithm for LevenshteinMatcher {
    fn name(&self) -> SimilarityMetric {
        SimilarityMetric::Levenshtein
    }

    #[inline]
    fn compare(&self, source: &str, target: &str) -> f64 {
        levenshtein_similarity(source, target)
    }
}

/// Jaro similarity: matches within a window of `max_len / 2 - 1`, half the
/// out-of-order matches counted as transpositions.
pub fn jaro_similarity(source: &str, target: &str) -> f64 {
    let s1: Vec<char> = source.chars().collect();
    let s2: Vec<char> = target.chars().collect();

    if s1.is_empty() && s2.is_empty() {
        return 1.0;
    }
    if s1.is_empty() || s2.is_empty() {
        return 0.0;
    }

    let match_window = (s1.len().max(s2.len()) / 2).saturating_sub(1);
    let mut s1_matched = vec![false; s1.len()];
    let mut s2_matched = vec![false; s2.len()];
    let mut matches = 0usize;

    for (i, c) in s1.iter().enumerate() {
        let start = i.saturating_sub(match_window);
        let end = (i + match_window + 1).min(s2.len());
        for j in start..end {
            if !s2_matched[j] && s2[j] == *c {
                s1_matched[i] = true;
                s2_matched[j] = true;
                matches += 1;
                break;
            }
        }
    }

    if matches == 0 {
        return 0.0;
    }

    let mut out_of_order = 0usize;
    let mut k = 0usize;
    for (i, c) in s1.iter().enumerate() {
        if !s1_matched[i] {
            continue;
        }
        while !s2_matched[k] {
            k += 1;
        }
        if *c != s2[k] {
            out_of_order += 1;
        }
        k += 1;
    }

    let m = matches as f64;
    let t = (out_of_order / 2) as f64;
    (m / s1.len() as f64 + m / s2.len() as f64 + (m - t) / m) / 3.0
}

/// Jaro with the Winkler boost for a shared prefix of up to `max_prefix` chars.
pub fn jaro_winkler_similarity(source: &str, target: &str, prefix_scale: f64, max_prefix: usize) -> f64 {
    let jaro = jaro_similarity(source, target);
    let prefix = source
        .chars()
        .zip(target.chars())
        .take(max_prefix)
        .take_while(|(a, b)| a == b)
        .count();
    (jaro + prefix as f64 * prefix_scale * (1.0 - jaro)).clamp(0.0, 1.0)
}

pub struct JaroWinklerMatcher {
    prefix_scale: f64,
    max_prefix: usize,
}

impl JaroWinklerMatcher {
    pub fn with_config(prefix_scale: f64, max_prefix: usize) -> Self {
        Self { prefix_scale, max_prefix }
    }
}

impl SimilarityAlgorithm for JaroWinklerMatcher {
    fn name(&self) -> SimilarityMetric {
        SimilarityMetric::JaroWinkler
    }

    #[inline]
    fn compare(&self, source: &str, target: &str) -> f64 {
        jaro_winkler_similarity(source, target, self.prefix_scale, self.max_prefix)
    }
}

/// PhoneticMatcher recognizes known spelling families of local place names.
pub struct PhoneticMatcher {
    score: f64,
}

impl PhoneticMatcher {
    pub fn with_config(score: f64) -> Self {
        Self { score }
    }
}

impl SimilarityAlgorithm for PhoneticMatcher {
    fn name(&self) -> SimilarityMetric {
        SimilarityMetric::Phonetic
    }

    fn compare(&self, source: &str, target: &str) -> f64 {
        let source = compact(&source.to_lowercase());
        let target = compact(&target.to_lowercase());
        match (phonetic_group(&source), phonetic_group(&target)) {
            (Some(a), Some(b)) if a == b => self.score,
            _ => 0.0,
        }
    }
}

/// Factory for creating similarity algorithm instances
pub struct SimilarityAlgorithmFactory;

impl SimilarityAlgorithmFactory {
    pub fn create(metric: SimilarityMetric, config: &AlgorithmConfig) -> Box<dyn SimilarityAlgorithm> {
        match metric {
            SimilarityMetric::Exact => Box::new(ExactMatcher),
            SimilarityMetric::Substring => Box::new(SubstringMatcher::with_config(config.substring_min_len)),
            SimilarityMetric::Levenshtein => Box::new(LevenshteinMatcher),
            SimilarityMetric::JaroWinkler => Box::new(JaroWinklerMatcher::with_config(
                config.winkler_prefix_scale,
                config.winkler_max_prefix,
            )),
            SimilarityMetric::Phonetic => Box::new(PhoneticMatcher::with_config(config.phonetic_score)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn exact_compares_blocks_as_given() {
        assert_eq!(ExactMatcher.compare("lekkipeninsula", "lekkipeninsula"), 1.0);
        assert_eq!(ExactMatcher.compare("lekki", "lagos"), 0.0);
        assert_eq!(ExactMatcher.compare("", ""), 0.0);
    }

    #[test]
    fn extracted_blocks_meet_exactly_without_recleaning() {
        use crate::config::MatcherConfig;
        use crate::ngram::BlockExtractor;
        use crate::parser::AddressParser;

        // casing, punctuation and spacing are settled at extraction time
        let extractor = BlockExtractor::new(AddressParser::new_with_defaults(), &MatcherConfig::default());
        let provided = extractor.extract_provided_blocks("Eti-Osa, Lekki Peninsula");
        let text = extractor.extract_text_blocks("ETIOSA LEKKIPENINSULA");
        for block in ["etiosa", "lekkipeninsula"] {
            let p = provided.get(block).unwrap();
            let t = text.get(block).unwrap();
            assert_eq!(ExactMatcher.compare(p, t), 1.0);
        }
    }

    #[test]
    fn substring_scales_by_length_ratio() {
        let substring = SubstringMatcher::with_config(3);
        assert!(approx(substring.compare("plot", "plot45"), 4.0 / 6.0));
        assert!(approx(substring.compare("plot45", "plot"), 4.0 / 6.0));
        assert_eq!(substring.compare("45", "plot45"), 0.0);
        assert_eq!(substring.compare("lekki", "lagos"), 0.0);
        assert_eq!(substring.compare("same", "same"), 1.0);
    }

    #[test]
    fn levenshtein_distance_and_similarity() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_similarity("", ""), 1.0);
        assert!(approx(levenshtein_similarity("kitten", "sitting"), 1.0 - 3.0 / 7.0));
        assert_eq!(levenshtein_similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn jaro_winkler_reference_values() {
        assert!(approx(jaro_similarity("martha", "marhta"), 0.944));
        assert!(approx(jaro_winkler_similarity("martha", "marhta", 0.1, 4), 0.961));
        assert!(approx(jaro_winkler_similarity("dixon", "dicksonx", 0.1, 4), 0.813));
        assert_eq!(jaro_similarity("", ""), 1.0);
        assert_eq!(jaro_similarity("abc", ""), 0.0);
        assert_eq!(jaro_similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn jaro_winkler_is_symmetric() {
        let pairs = [("lekki", "leki"), ("peninsula", "penisula"), ("plot45", "plot")];
        for (a, b) in pairs {
            assert!(approx(
                jaro_winkler_similarity(a, b, 0.1, 4),
                jaro_winkler_similarity(b, a, 0.1, 4)
            ));
        }
    }

    #[test]
    fn phonetic_scores_same_family_only() {
        let phonetic = PhoneticMatcher::with_config(0.9);
        assert_eq!(phonetic.compare("Penisula", "peninsula"), 0.9);
        assert_eq!(phonetic.compare("lekky", "leki"), 0.9);
        assert_eq!(phonetic.compare("lekky", "scheme"), 0.0);
        assert_eq!(phonetic.compare("surulere", "surulere"), 0.0);
    }

    #[test]
    fn factory_builds_every_metric() {
        for metric in SimilarityMetric::all() {
            let algorithm = SimilarityAlgorithmFactory::create(metric, &AlgorithmConfig::default());
            assert_eq!(algorithm.name(), metric);
        }
    }
}
