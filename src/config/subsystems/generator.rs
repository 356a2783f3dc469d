// src/config/subsystems/generator.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;
use crate::ngram::{NGramConfig, DEFAULT_NGRAM_SIZE};
use log::LevelFilter;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    // Size of character n-grams compared between documents
    pub ngram_size: usize,

    // Log level
    pub log_level: String,
    #[serde(skip)]
    level_filter: Option<LevelFilter>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            ngram_size: DEFAULT_NGRAM_SIZE,
            log_level: "info".to_string(),
            level_filter: Some(LevelFilter::Info),
        }
    }
}

pub fn parse_level_filter(value: &str) -> Option<LevelFilter> {
    match value.trim().to_lowercase().as_str() {
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        "none" | "off" => Some(LevelFilter::Off),
        _ => None,
    }
}

impl FromIni for GeneratorConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "generator" {
            return None;
        }

        match key {
            "ngram_size" => {
                match value.parse() {
                    Ok(size) if size > 0 => {
                        self.ngram_size = size;
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid ngram_size (must be > 0): {}", value)
                    ))),
                }
            },
            "log_level" => {
                Some(match parse_level_filter(value) {
                    Some(level) => {
                        self.log_level = value.trim().to_lowercase();
                        self.level_filter = Some(level);
                        Ok(())
                    },
                    None => Err(Error::Config(
                        format!("Invalid log level '{}'. Must be one of: none, error, warn, info, debug, trace", value)
                    )),
                })
            },
            _ => None,
        }
    }
}

impl GeneratorConfig {
    pub fn get_log_level(&self) -> LevelFilter {
        if let Some(level) = self.level_filter {
            return level;
        }
        parse_level_filter(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn ngram_config(&self) -> NGramConfig {
        NGramConfig { ngram_size: self.ngram_size }
    }

    pub fn validate(&self) -> Result<()> {
        if self.ngram_size == 0 {
            return Err(Error::invalid_argument("ngram_size must be greater than 0"));
        }
        if parse_level_filter(&self.log_level).is_none() {
            return Err(Error::Config(
                format!("Unknown log level: {}", self.log_level)
            ));
        }
        Ok(())
    }

    pub fn describe(&self) -> String {
        format!(
            "NGram generator configuration:\n\
             - NGram size: {} characters\n\
             - Log level: {}",
            self.ngram_size,
            self.log_level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.ngram_size, 2);
        assert_eq!(config.get_log_level(), LevelFilter::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_keys() {
        let mut config = GeneratorConfig::default();
        assert!(matches!(config.from_ini_section("generator", "ngram_size", "3"), Some(Ok(()))));
        assert!(matches!(config.from_ini_section("generator", "log_level", "DEBUG"), Some(Ok(()))));
        assert_eq!(config.ngram_size, 3);
        assert_eq!(config.get_log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = GeneratorConfig::default();
        assert!(matches!(config.from_ini_section("generator", "ngram_size", "0"), Some(Err(_))));
        assert!(matches!(config.from_ini_section("generator", "ngram_size", "two"), Some(Err(_))));
        assert!(matches!(config.from_ini_section("generator", "log_level", "loud"), Some(Err(_))));
        assert_eq!(config.ngram_size, 2);
    }

    #[test]
    fn test_zero_size_is_invalid_argument() {
        let config = GeneratorConfig { ngram_size: 0, ..GeneratorConfig::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_ignores_foreign_sections_and_keys() {
        let mut config = GeneratorConfig::default();
        assert!(config.from_ini_section("cache", "ngram_size", "3").is_none());
        assert!(config.from_ini_section("generator", "stride", "1").is_none());
    }
}
