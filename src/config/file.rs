// src/config/file.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use super::FromIni;

pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
pub const DEFAULT_MAX_PATH_LENGTH: usize = 260;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    // Largest document accepted, in bytes
    pub max_file_size: u64,
    // Longest path accepted for inputs and the result file
    pub max_path_length: usize,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_path_length: DEFAULT_MAX_PATH_LENGTH,
        }
    }
}

impl FromIni for FileConfig {
    fn from_ini_section(&mut self, _section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        match key {
            "max_file_size" => {
                match value.trim_matches('"').parse() {
                    Ok(size) if size > 0 => {
                        self.max_file_size = size;
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid max_file_size (must be > 0): {}", value)
                    ))),
                }
            },
            "max_path_length" => {
                match value.trim_matches('"').parse() {
                    Ok(length) if length > 0 => {
                        self.max_path_length = length;
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid max_path_length (must be > 0): {}", value)
                    ))),
                }
            },
            _ => None,
        }
    }
}

impl FileConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_file_size == 0 {
            return Err(Error::Config("max_file_size must be greater than 0".to_string()));
        }
        if self.max_path_length == 0 {
            return Err(Error::Config("max_path_length must be greater than 0".to_string()));
        }
        Ok(())
    }
}
