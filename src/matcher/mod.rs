pub mod algorithms;
pub mod similarity;
pub mod blocks;
pub mod decision;
pub mod name;
pub mod scoring;
pub mod candidates;
pub mod engine;
pub mod types;
// Re-export the main types
pub use self::similarity::SimilarityCalculator;
pub use self::blocks::BlockMatcher;
pub use self::decision::AddressDecider;
pub use self::name::NameMatcher;
pub use self::scoring::ScoreBlender;
pub use self::candidates::find_address_candidates;
pub use self::engine::VerificationEngine;
pub use self::types::{
    AddressDecision,
    BlockMatch,
    BlockMatchReport,
    MatchType,
    NameMatch
};
