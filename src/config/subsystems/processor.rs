// src/config/subsystems/processor.rs

use serde::{Serialize, Deserialize};
use log::LevelFilter;
use crate::error::{Error, Result};
use crate::config::{FromIni, parse_positive};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    pub log_level: String,
    // Batches smaller than this are verified sequentially
    pub parallel_threshold: usize,
    // 0 means one thread per logical CPU
    pub thread_count: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            parallel_threshold: 8,
            thread_count: 0,
        }
    }
}

impl FromIni for ProcessorConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "processor" {
            return None;
        }

        match key {
            "log_level" => {
                let level = value.trim_matches('"').to_lowercase();
                if parse_level(&level).is_some() {
                    self.log_level = level;
                    Some(Ok(()))
                } else {
                    Some(Err(Error::Config(
                        format!("Invalid log_level (error, warn, info, debug, trace, none): {}", value)
                    )))
                }
            },
            "parallel_threshold" => Some(parse_positive(key, value).map(|v| {
                self.parallel_threshold = v;
            })),
            "thread_count" => {
                match value.parse() {
                    Ok(count) => {
                        self.thread_count = count;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid thread_count: {}", value)
                    ))),
                }
            },
            _ => None,
        }
    }
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.trim().to_lowercase().as_str() {
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        "none" | "off" => Some(LevelFilter::Off),
        _ => None,
    }
}

impl ProcessorConfig {
    pub fn get_log_level(&self) -> LevelFilter {
        parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn set_log_level(&mut self, level: &str) -> Result<()> {
        match parse_level(level) {
            Some(_) => {
                self.log_level = level.trim().to_lowercase();
                Ok(())
            }
            None => Err(Error::Config(format!("Invalid log level: {}", level))),
        }
    }

    pub fn effective_threads(&self) -> usize {
        if self.thread_count == 0 {
            num_cpus::get()
        } else {
            self.thread_count
        }
    }

    pub fn validate(&self) -> Result<()> {
        if parse_level(&self.log_level).is_none() {
            return Err(Error::Config(
                format!("Invalid log_level: {}", self.log_level)
            ));
        }
        if self.parallel_threshold == 0 {
            return Err(Error::Config(
                "parallel_threshold must be greater than 0".to_string()
            ));
        }
        Ok(())
    }
}
