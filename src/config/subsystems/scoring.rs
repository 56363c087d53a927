// src/config/subsystems/scoring.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::{FromIni, parse_unit_interval};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub address_weight: f64,
    pub name_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            address_weight: 0.7,
            name_weight: 0.3,
        }
    }
}

impl FromIni for ScoringConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "scoring" {
            return None;
        }

        match key {
            "address_weight" => Some(parse_unit_interval(key, value).map(|v| {
                self.address_weight = v;
            })),
            "name_weight" => Some(parse_unit_interval(key, value).map(|v| {
                self.name_weight = v;
            })),
            _ => None,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<()> {
        let total = self.address_weight + self.name_weight;
        if (total - 1.0).abs() > 1e-6 {
            return Err(Error::Config(
                format!("address_weight + name_weight must equal 1.0, got {:.4}", total)
            ));
        }
        Ok(())
    }
}
