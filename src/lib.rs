//! docmatch verifies that a user-supplied address and name appear in the
//! text of a document read by OCR. It tolerates OCR noise such as run-together
//! words, dropped punctuation and common misspellings of local place names.

// Module declarations
pub mod error;
pub mod parser;
pub mod ngram;
pub mod matcher;
pub mod ocr;
pub mod config;
pub mod types;

// Re-exports
pub use error::{Error, Result};
pub use matcher::{MatchType, VerificationEngine};
pub use ocr::{with_ocr_session, OcrEngine, OcrOutput, OcrSession, PlainTextEngine};
pub use types::{MatchInput, MatchResult};

// Re-export the config from config module
pub use config::DocMatchConfig;
