// src/matcher/scoring.rs

use crate::config::ScoringConfig;

/// Folds the address and name signals into the final 0-100 match score.
#[derive(Debug, Clone)]
pub struct ScoreBlender {
    address_weight: f64,
    name_weight: f64,
}

impl ScoreBlender {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            address_weight: config.address_weight,
            name_weight: config.name_weight,
        }
    }

    /// A confirmed address overrides the blend.
    pub fn blend(&self, address_score: f64, name_score: u8, confirmed: bool) -> u8 {
        if confirmed {
            return 100;
        }
        let blended = address_score * self.address_weight + f64::from(name_score) * self.name_weight;
        if !blended.is_finite() {
            return 0;
        }
        blended.round().clamp(0.0, 100.0) as u8
    }
}

impl Default for ScoreBlender {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}
