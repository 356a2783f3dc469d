pub mod generator;
pub mod types;

pub use self::generator::{ngram_frequencies, NGramGenerator};
pub use self::types::{FrequencyMap, NGramConfig, DEFAULT_NGRAM_SIZE};

pub use crate::error::{Error, Result};
