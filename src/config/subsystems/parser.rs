// src/config/subsystems/parser.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::{FromIni, parse_positive};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    // Fold known OCR misspellings of place names to one spelling
    pub fold_misspellings: bool,
    // Tokens shorter than this (in chars) are dropped
    pub min_token_len: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            fold_misspellings: true,
            min_token_len: 2,
        }
    }
}

impl FromIni for ParserConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "parser" {
            return None;
        }

        match key {
            "fold_misspellings" => {
                match value.parse() {
                    Ok(flag) => {
                        self.fold_misspellings = flag;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid fold_misspellings value (must be true/false): {}", value)
                    ))),
                }
            },
            "min_token_len" => Some(parse_positive(key, value).map(|len| {
                self.min_token_len = len;
            })),
            _ => None,
        }
    }
}

impl ParserConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_token_len == 0 {
            return Err(Error::Config(
                "min_token_len must be greater than 0".to_string()
            ));
        }
        Ok(())
    }
}
