// src/config/subsystems/cache.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    // Maximum number of (text, ngram size) entries kept before LRU eviction
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_enabled() -> bool { true }
fn default_capacity() -> usize { 128 }

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            capacity: default_capacity(),
        }
    }
}

impl FromIni for CacheConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "cache" {
            return None;
        }

        match key {
            "enabled" => {
                match value.parse() {
                    Ok(flag) => {
                        self.enabled = flag;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid enabled value (must be true/false): {}", value)
                    ))),
                }
            },
            "capacity" => {
                match value.parse() {
                    Ok(capacity) if capacity > 0 => {
                        self.capacity = capacity;
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid capacity (must be > 0): {}", value)
                    ))),
                }
            },
            _ => None,
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.capacity == 0 {
            return Err(Error::Config(
                "cache capacity must be greater than 0 when the cache is enabled".to_string()
            ));
        }
        Ok(())
    }

    pub fn describe(&self) -> String {
        if self.enabled {
            format!("frequency cache enabled ({} entries)", self.capacity)
        } else {
            "frequency cache disabled".to_string()
        }
    }
}
