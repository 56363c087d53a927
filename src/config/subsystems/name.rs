// src/config/subsystems/name.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::{FromIni, parse_unit_interval};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameConfig {
    /// Average per-token similarity at which a name counts as matched.
    /// Drives both the boolean verdict and the flag reported next to the score.
    pub match_threshold: f64,
}

impl Default for NameConfig {
    fn default() -> Self {
        Self { match_threshold: 0.6 }
    }
}

impl FromIni for NameConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "name" {
            return None;
        }

        match key {
            "match_threshold" => Some(parse_unit_interval(key, value).map(|v| {
                self.match_threshold = v;
            })),
            _ => None,
        }
    }
}

impl NameConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.match_threshold) {
            return Err(Error::Config(
                "name match_threshold must be between 0 and 1".to_string()
            ));
        }
        Ok(())
    }
}
