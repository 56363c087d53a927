//! Named pattern tables used by normalization, block extraction and
//! address candidate detection. Every rule carries a name so it can be
//! exercised on its own.

use ahash::AHashMap;
use lazy_static::lazy_static;
use regex::Regex;

/// Folds OCR and spelling variants of a place-name term to one spelling.
/// Applied to text that is already lowercase with punctuation removed.
pub struct FoldRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub canonical: &'static str,
}

/// Recognizes a multi-word address idiom in raw input.
/// Each hit becomes one compacted block.
pub struct CompoundRule {
    pub name: &'static str,
    pub pattern: Regex,
}

/// Locates an address-like substring in OCR text.
pub struct CandidateRule {
    pub name: &'static str,
    pub pattern: Regex,
}

fn fold(name: &'static str, pattern: &str, canonical: &'static str) -> FoldRule {
    FoldRule { name, pattern: Regex::new(pattern).unwrap(), canonical }
}

fn compound(name: &'static str, pattern: &str) -> CompoundRule {
    CompoundRule { name, pattern: Regex::new(pattern).unwrap() }
}

fn candidate(name: &'static str, pattern: &str) -> CandidateRule {
    CandidateRule { name, pattern: Regex::new(pattern).unwrap() }
}

/// Words whose co-occurrence marks a line as an address line.
pub const ADDRESS_KEYWORDS: &[&str] = &[
    "lekki", "peninsula", "residential", "scheme", "eti", "osa",
    "lagos", "estate", "plot", "block", "phase",
];

/// Spelling families scored by the phonetic metric. Entries are compacted
/// lowercase forms.
pub const PHONETIC_GROUPS: &[(&str, &[&str])] = &[
    ("peninsula", &["peninsula", "penisula", "pennisula", "peninsular", "peninsla", "peninsulla", "penninsula"]),
    ("residential", &["residential", "residental", "residencial", "recidential", "residentail"]),
    ("scheme", &["scheme", "scheem", "schem", "sheme", "skeme", "skeem"]),
    ("lekki", &["lekki", "leki", "lekky", "lekkie", "leky"]),
    ("etiosa", &["etiosa", "etiossa", "ettiosa", "etiosha", "ettiossa"]),
];

lazy_static! {
    // Order matters: later rules see the output of earlier ones.
    pub static ref FOLD_RULES: Vec<FoldRule> = vec![
        fold("peninsula", r"\bpen+[iy]n?s[ue]?la?r?\b", "peninsula"),
        fold("residential", r"\bres[iy]d[ae]n[ct]i?a[l1]\b", "residential"),
        fold("scheme", r"\bsc?he{1,2}me?\b", "scheme"),
        fold("lekki", r"\blek+[iy]+e?\b", "lekki"),
        fold("eti_osa", r"\bet+i\s*os+a\b", "eti osa"),
        fold("lagos", r"\b[li]ag[o0]s\b", "lagos"),
    ];

    pub static ref COMPOUND_RULES: Vec<CompoundRule> = vec![
        compound("lekki_peninsula", r"(?i)\blekki\s*peninsula\b"),
        compound("residential_scheme", r"(?i)\bresidential\s*scheme\b"),
        compound("eti_osa", r"(?i)\beti[\s-]*osa\b"),
        compound("victoria_island", r"(?i)\bvictoria\s*island\b"),
        compound("estate", r"(?i)\b[\p{L}\p{N}]+\s+estate\b"),
        compound("close", r"(?i)\b[\p{L}\p{N}]+\s+close\b"),
        compound("street", r"(?i)\b[\p{L}\p{N}]+\s+street\b"),
        compound("road", r"(?i)\b[\p{L}\p{N}]+\s+road\b"),
        compound("avenue", r"(?i)\b[\p{L}\p{N}]+\s+avenue\b"),
        compound("plot", r"(?i)\bplot\s*\d+[a-z]?\b"),
        compound("block", r"(?i)\bblock\s*(?:\d+|[a-z])\b"),
        compound("phase", r"(?i)\bphase\s*(?:\d+|[ivx]+)\b"),
    ];

    pub static ref CANDIDATE_RULES: Vec<CandidateRule> = vec![
        candidate(
            "numbered_street",
            r"(?i)\b\d+[a-z]?[, \t]+(?:[\p{L}'.-]+[ \t]+){0,4}(?:street|st|road|rd|avenue|ave|close|crescent|drive|way|lane|estate)\b[^\r\n]*",
        ),
        candidate("plot_line", r"(?i)\bplot[ \t]*\d+[^\r\n]*"),
        candidate("po_box", r"(?i)\bp\.?[ \t]*o\.?[ \t]*box[ \t]*\d+[^\r\n]*"),
    ];

    static ref PHONETIC_INDEX: AHashMap<&'static str, &'static str> = {
        let mut index = AHashMap::new();
        for (group, variants) in PHONETIC_GROUPS {
            for variant in *variants {
                index.insert(*variant, *group);
            }
        }
        index
    };
}

/// Returns the phonetic group a compacted lowercase word belongs to.
pub fn phonetic_group(word: &str) -> Option<&'static str> {
    PHONETIC_INDEX.get(word).copied()
}

/// Counts the address keywords contained in a normalized line.
pub fn keyword_hits(normalized_line: &str) -> usize {
    ADDRESS_KEYWORDS
        .iter()
        .filter(|kw| normalized_line.contains(*kw))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold_rule(name: &str) -> &'static FoldRule {
        FOLD_RULES.iter().find(|r| r.name == name).unwrap()
    }

    fn compound_rule(name: &str) -> &'static CompoundRule {
        COMPOUND_RULES.iter().find(|r| r.name == name).unwrap()
    }

    #[test]
    fn fold_rules_map_variants_to_canonical() {
        let cases = [
            ("peninsula", &["penisula", "pennisula", "peninsular", "peninsula"][..]),
            ("residential", &["residental", "residencial", "residentia1"][..]),
            ("scheme", &["scheem", "schem", "sheme"][..]),
            ("lekki", &["leki", "lekky", "lekkie"][..]),
            ("eti_osa", &["etiosa", "eti osa", "etti ossa"][..]),
            ("lagos", &["lag0s", "iagos", "lagos"][..]),
        ];
        for (name, variants) in cases {
            let rule = fold_rule(name);
            for variant in variants {
                let folded = rule.pattern.replace_all(variant, rule.canonical);
                assert_eq!(folded, rule.canonical, "{} did not fold {}", name, variant);
            }
        }
    }

    #[test]
    fn fold_rules_leave_unrelated_words_alone() {
        for rule in FOLD_RULES.iter() {
            for word in ["street", "surulere", "penny", "leaks", "ikoyi"] {
                assert!(!rule.pattern.is_match(word), "{} matched {}", rule.name, word);
            }
        }
    }

    #[test]
    fn fold_rules_are_stable_on_canonical_forms() {
        for rule in FOLD_RULES.iter() {
            assert_eq!(rule.pattern.replace_all(rule.canonical, rule.canonical), rule.canonical);
        }
    }

    #[test]
    fn compound_rules_match_ocr_runs() {
        assert!(compound_rule("plot").pattern.is_match("PLOT45 BLOCKC"));
        assert!(compound_rule("block").pattern.is_match("PLOT45 BLOCKC LEKKI"));
        assert!(compound_rule("block").pattern.is_match("Block C,"));
        assert!(compound_rule("phase").pattern.is_match("Lekki Phase 1"));
        assert!(compound_rule("eti_osa").pattern.is_match("Eti-Osa"));
        assert!(compound_rule("lekki_peninsula").pattern.is_match("LEKKIPENINSULA"));
        assert!(compound_rule("street").pattern.is_match("15 Adelabu Street"));
        assert!(!compound_rule("road").pattern.is_match("railroad"));
    }

    #[test]
    fn candidate_rules_find_address_lines() {
        let rule = CANDIDATE_RULES.iter().find(|r| r.name == "numbered_street").unwrap();
        let hit = rule.pattern.find("Bill to:\n15 Adelabu Street, Surulere\nAmount").unwrap();
        assert_eq!(hit.as_str(), "15 Adelabu Street, Surulere");

        let rule = CANDIDATE_RULES.iter().find(|r| r.name == "po_box").unwrap();
        assert!(rule.pattern.is_match("P.O. Box 1234 Ikeja"));
    }

    #[test]
    fn candidate_rules_stay_on_one_line() {
        let rule = CANDIDATE_RULES.iter().find(|r| r.name == "numbered_street").unwrap();
        assert!(!rule.pattern.is_match("Invoice no 2024\nMain Street office"));
        assert!(!rule.pattern.is_match("Account 12\nAdelabu\nStreet"));

        let rule = CANDIDATE_RULES.iter().find(|r| r.name == "plot_line").unwrap();
        assert!(!rule.pattern.is_match("Plot\n45"));
    }

    #[test]
    fn phonetic_lookup() {
        assert_eq!(phonetic_group("penisula"), Some("peninsula"));
        assert_eq!(phonetic_group("lekky"), Some("lekki"));
        assert_eq!(phonetic_group("surulere"), None);
    }

    #[test]
    fn keyword_hits_count_distinct_keywords() {
        assert_eq!(keyword_hits("plot 45 lekki phase 1"), 3);
        assert_eq!(keyword_hits("amount due 4500"), 0);
    }
}
