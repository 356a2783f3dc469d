pub mod similarity;
pub mod types;

// Re-export the main types
pub use self::similarity::{cosine_similarity, cosine_from_frequencies, SimilarityCalculator};
pub use self::types::SimilarityBreakdown;
