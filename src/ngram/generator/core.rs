// src/ngram/generator/core.rs

use log::debug;

use crate::error::{Error, Result};
use crate::ngram::types::{FrequencyMap, NGramConfig};

pub struct NGramGenerator {
    pub(crate) config: NGramConfig,
}

impl NGramGenerator {
    pub fn new(config: NGramConfig) -> Result<Self> {
        validate_ngram_size(config.ngram_size)?;
        debug!("Created character ngram generator with size {}", config.ngram_size);
        Ok(Self { config })
    }

    pub fn with_size(ngram_size: usize) -> Result<Self> {
        Self::new(NGramConfig { ngram_size })
    }

    pub fn ngram_size(&self) -> usize {
        self.config.ngram_size
    }

    /// Count every overlapping window of `ngram_size` characters in already-normalized text.
    pub fn frequencies(&self, text: &str) -> FrequencyMap {
        self.count_char_ngrams(text)
    }
}

pub(crate) fn validate_ngram_size(ngram_size: usize) -> Result<()> {
    if ngram_size == 0 {
        return Err(Error::invalid_argument(
            "ngram size must be a positive integer, got 0"
        ));
    }
    Ok(())
}

/// Frequency map of the character n-grams of `text`.
///
/// `text` is expected to be normalized already. A text shorter than `n`
/// characters yields an empty map; `n == 0` is rejected.
pub fn ngram_frequencies(text: &str, n: usize) -> Result<FrequencyMap> {
    let generator = NGramGenerator::with_size(n)?;
    Ok(generator.frequencies(text))
}
