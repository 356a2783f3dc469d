// types.rs
use serde::{Serialize, Deserialize};

/// Intermediate sums of one cosine comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityBreakdown {
    pub similarity: f64,
    pub ngram_size: usize,
    pub source_distinct: usize,
    pub target_distinct: usize,
    pub shared_distinct: usize,
    pub dot_product: u128,
    pub source_magnitude: f64,
    pub target_magnitude: f64,
}

impl SimilarityBreakdown {
    pub(crate) fn degenerate(ngram_size: usize) -> Self {
        Self {
            similarity: 0.0,
            ngram_size,
            source_distinct: 0,
            target_distinct: 0,
            shared_distinct: 0,
            dot_product: 0,
            source_magnitude: 0.0,
            target_magnitude: 0.0,
        }
    }
}
