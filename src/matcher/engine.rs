// src/matcher/engine.rs

use log::{debug, info};
use rayon::prelude::*;

use crate::config::DocMatchConfig;
use crate::error::Result;
use crate::ocr::{OcrEngine, OcrSession};
use crate::parser::{AddressParser, TextParser};
use crate::types::{MatchInput, MatchResult};
use super::blocks::BlockMatcher;
use super::candidates::find_address_candidates;
use super::decision::AddressDecider;
use super::name::NameMatcher;
use super::scoring::ScoreBlender;

/// Verifies a provided address and name against the text of a document.
///
/// The engine holds no per-request state; one instance can serve any
/// number of threads.
pub struct VerificationEngine {
    config: DocMatchConfig,
    parser: AddressParser,
    block_matcher: BlockMatcher,
    decider: AddressDecider,
    name_matcher: NameMatcher,
    blender: ScoreBlender,
}

impl VerificationEngine {
    pub fn new(config: DocMatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    pub fn with_defaults() -> Self {
        Self::build(DocMatchConfig::default())
    }

    fn build(config: DocMatchConfig) -> Self {
        let parser = AddressParser::new(config.parser.clone());
        Self {
            block_matcher: BlockMatcher::new(&config.matcher, parser.clone()),
            decider: AddressDecider::new(&config.matcher),
            name_matcher: NameMatcher::new(&config.name, parser.clone()),
            blender: ScoreBlender::new(&config.scoring),
            parser,
            config,
        }
    }

    pub fn config(&self) -> &DocMatchConfig {
        &self.config
    }

    pub fn verify_document_text(&self, provided_address: &str, provided_full_name: &str, extracted_text: &str) -> MatchResult {
        self.verify_text(provided_address, provided_full_name, extracted_text, None)
    }

    pub fn verify(&self, input: &MatchInput) -> MatchResult {
        self.verify_text(
            &input.provided_address,
            &input.provided_full_name,
            &input.extracted_text,
            input.confidence,
        )
    }

    /// Verifies every input, in parallel once the batch is large enough.
    /// Results are returned in input order.
    pub fn verify_batch(&self, inputs: &[MatchInput]) -> Vec<MatchResult> {
        if inputs.len() >= self.config.processor.parallel_threshold {
            debug!("verifying batch of {} in parallel", inputs.len());
            inputs.par_iter().map(|input| self.verify(input)).collect()
        } else {
            inputs.iter().map(|input| self.verify(input)).collect()
        }
    }

    /// Runs OCR on a document buffer and verifies the recognized text.
    pub fn verify_document_bytes<E: OcrEngine>(
        &self,
        session: &mut OcrSession<E>,
        bytes: &[u8],
        provided_address: &str,
        provided_full_name: &str,
    ) -> Result<MatchResult> {
        let output = session.recognize(bytes)?;
        Ok(self.verify_text(provided_address, provided_full_name, &output.text, Some(output.confidence)))
    }

    fn verify_text(
        &self,
        provided_address: &str,
        provided_full_name: &str,
        extracted_text: &str,
        confidence: Option<f64>,
    ) -> MatchResult {
        let normalized_address = self.parser.normalize(provided_address);
        let normalized_text = self.parser.normalize(extracted_text);

        let report = self.block_matcher.match_blocks(provided_address, extracted_text);
        let decision = self.decider.decide(&normalized_address, &normalized_text, &report);
        let name = self.name_matcher.match_name(provided_full_name, extracted_text);
        let match_score = self.blender.blend(decision.final_score, name.score, decision.confirmed);

        info!(
            "verified document: address {} (strict {}, fuzzy {}), name {}, score {}",
            decision.address_matched,
            decision.strict_address_matched,
            decision.fuzzy_address_matched,
            name.matched,
            match_score
        );

        MatchResult {
            extracted_text: extracted_text.to_string(),
            found_addresses: find_address_candidates(extracted_text, &self.parser),
            address_matched: decision.address_matched,
            fuzzy_address_matched: decision.fuzzy_address_matched,
            strict_address_matched: decision.strict_address_matched,
            name_matched: name.matched,
            match_score,
            confidence: confidence.unwrap_or(0.0),
            block_matches: report.total_matches,
            total_blocks: report.provided_blocks.len(),
            matching_blocks: report.matched_blocks.iter().map(|m| m.describe()).collect(),
            normalized_provided_address: normalized_address,
            normalized_extracted_text: normalized_text,
            matched_ngram: decision.matched_ngram,
            address_score: decision.final_score,
            name_score: name.score,
            block_details: report.matched_blocks,
        }
    }
}
