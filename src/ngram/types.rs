use ahash::AHashMap;

/// Sparse frequency vector: one entry per distinct n-gram, value is its occurrence count.
pub type FrequencyMap = AHashMap<String, usize>;

pub const DEFAULT_NGRAM_SIZE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NGramConfig {
    pub ngram_size: usize,
}

impl Default for NGramConfig {
    fn default() -> Self {
        Self {
            ngram_size: DEFAULT_NGRAM_SIZE,
        }
    }
}
