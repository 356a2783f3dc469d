//! simcheck estimates textual overlap between two documents.
//! It normalizes text, counts overlapping character n-grams and scores the
//! pair by the cosine similarity of their n-gram frequency vectors.

// Module declarations
pub mod error;
pub mod parser;
pub mod ngram;
pub mod matcher;
pub mod storage;
pub mod encoder;
pub mod utils;
pub mod config;

// Re-exports
pub use error::{Error, Result};
pub use parser::normalize;
pub use ngram::{ngram_frequencies, FrequencyMap, DEFAULT_NGRAM_SIZE};
pub use matcher::{cosine_similarity, SimilarityCalculator};
pub use encoder::encode;
pub use storage::FrequencyCache;

// Re-export the config from config module
pub use config::SimcheckConfig;
