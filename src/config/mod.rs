pub mod subsystems;

use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;
use crate::error::{Error, Result};
use log::{info, warn, trace};

pub use subsystems::{MatcherConfig, NameConfig, ParserConfig, ProcessorConfig, ScoringConfig};

pub trait FromIni {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocMatchConfig {
    pub parser: ParserConfig,
    pub matcher: MatcherConfig,
    pub name: NameConfig,
    pub scoring: ScoringConfig,
    pub processor: ProcessorConfig,
}

impl DocMatchConfig {
    pub fn validate(&self) -> Result<()> {
        self.parser.validate()?;
        self.matcher.validate()?;
        self.name.validate()?;
        self.scoring.validate()?;
        self.processor.validate()?;
        Ok(())
    }

    pub fn from_ini<P: AsRef<Path>>(path: P) -> Result<Self> {
        let absolute_path = std::fs::canonicalize(&path)
            .unwrap_or_else(|_| path.as_ref().to_path_buf());

        trace!("Loading configuration from: {:?}", absolute_path);

        let content = fs::read_to_string(&path)?;
        let config = Self::from_ini_str(&content)?;

        info!("Loaded configuration from {:?}", absolute_path);
        Ok(config)
    }

    pub fn from_ini_str(content: &str) -> Result<Self> {
        let mut config = Self::default();
        let mut current_section = String::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len() - 1].trim().to_string();
                trace!("  Line {}: Found section: [{}]", line_num + 1, current_section);
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                warn!("Ignoring malformed config line {}: {}", line_num + 1, line);
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            // Delegate to appropriate subsystem config
            let handled = match current_section.as_str() {
                "parser" => config.parser.from_ini_section(&current_section, key, value),
                "matcher" => config.matcher.from_ini_section(&current_section, key, value),
                s if s.starts_with("matcher.") => config.matcher.from_ini_section(&current_section, key, value),
                "name" => config.name.from_ini_section(&current_section, key, value),
                "scoring" => config.scoring.from_ini_section(&current_section, key, value),
                "processor" => config.processor.from_ini_section(&current_section, key, value),
                _ => None,
            };

            match handled {
                Some(Err(e)) => return Err(e),
                Some(Ok(())) => {}
                None => warn!("Unrecognized config key: {}={} in section [{}]", key, value, current_section),
            }
        }

        config.validate()?;
        Ok(config)
    }
}

pub(crate) fn parse_unit_interval(key: &str, value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(v) if (0.0..=1.0).contains(&v) => Ok(v),
        _ => Err(Error::Config(
            format!("Invalid {} (must be between 0 and 1): {}", key, value)
        )),
    }
}

pub(crate) fn parse_positive(key: &str, value: &str) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(Error::Config(
            format!("Invalid {} (must be > 0): {}", key, value)
        )),
    }
}

pub(crate) fn parse_score(key: &str, value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(v) if (0.0..=100.0).contains(&v) => Ok(v),
        _ => Err(Error::Config(
            format!("Invalid {} (must be between 0 and 100): {}", key, value)
        )),
    }
}
