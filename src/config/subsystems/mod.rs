pub mod parser;
pub mod matcher;
pub mod name;
pub mod scoring;
pub mod processor;

pub use parser::ParserConfig;
pub use matcher::{MatcherConfig, SimilarityWeights, AlgorithmConfig};
pub use name::NameConfig;
pub use scoring::ScoringConfig;
pub use processor::ProcessorConfig;
