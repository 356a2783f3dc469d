use std::sync::Arc;
use log::{debug, trace, warn};

use crate::error::Result;
use crate::config::SimcheckConfig;
use crate::config::subsystems::GeneratorConfig;
use crate::ngram::{FrequencyMap, NGramConfig, NGramGenerator, DEFAULT_NGRAM_SIZE};
use crate::ngram::generator::validate_ngram_size;
use crate::parser::{normalize, TextParser, WordCharParser};
use crate::storage::{CacheStats, FrequencyCache};
use super::types::SimilarityBreakdown;

/// Cosine similarity of the character n-gram profiles of two raw texts.
///
/// Both texts are normalized first. Empty or too-short texts score `0.0`;
/// the result always lies in `[0.0, 1.0]` and is symmetric in its arguments.
pub fn cosine_similarity(text_a: &str, text_b: &str, n: usize) -> Result<f64> {
    validate_ngram_size(n)?;

    let text_a = normalize(text_a);
    let text_b = normalize(text_b);
    if text_a.is_empty() || text_b.is_empty() {
        trace!("Empty text after normalization, similarity is 0");
        return Ok(0.0);
    }

    let generator = NGramGenerator::with_size(n)?;
    let freqs_a = generator.frequencies(&text_a);
    let freqs_b = generator.frequencies(&text_b);

    Ok(cosine_from_frequencies(&freqs_a, &freqs_b))
}

/// Cosine of the angle between two sparse frequency vectors, clamped to `[0, 1]`.
pub fn cosine_from_frequencies(source: &FrequencyMap, target: &FrequencyMap) -> f64 {
    compare_frequencies(source, target, 0).similarity
}

pub(crate) fn compare_frequencies(
    source: &FrequencyMap,
    target: &FrequencyMap,
    ngram_size: usize,
) -> SimilarityBreakdown {
    if source.is_empty() || target.is_empty() {
        return SimilarityBreakdown::degenerate(ngram_size);
    }

    // Only shared keys contribute; walk the smaller map and probe the larger one
    let (smaller, larger) = if source.len() <= target.len() {
        (source, target)
    } else {
        (target, source)
    };

    let mut dot_product: u128 = 0;
    let mut shared_distinct = 0;
    for (gram, &count) in smaller.iter() {
        if let Some(&other) = larger.get(gram) {
            dot_product += count as u128 * other as u128;
            shared_distinct += 1;
        }
    }

    let source_magnitude = magnitude(source);
    let target_magnitude = magnitude(target);

    let mut breakdown = SimilarityBreakdown {
        similarity: 0.0,
        ngram_size,
        source_distinct: source.len(),
        target_distinct: target.len(),
        shared_distinct,
        dot_product,
        source_magnitude,
        target_magnitude,
    };

    if !source_magnitude.is_finite() || !target_magnitude.is_finite() {
        warn!("Non-finite vector magnitude ({}, {}), similarity forced to 0",
            source_magnitude, target_magnitude);
        return breakdown;
    }
    if source_magnitude == 0.0 || target_magnitude == 0.0 {
        return breakdown;
    }

    let similarity = dot_product as f64 / (source_magnitude * target_magnitude);
    if !similarity.is_finite() {
        warn!("Non-finite similarity ratio, forced to 0");
        return breakdown;
    }

    breakdown.similarity = similarity.clamp(0.0, 1.0);
    breakdown
}

fn magnitude(freqs: &FrequencyMap) -> f64 {
    let sum_of_squares: u128 = freqs.values()
        .map(|&count| count as u128 * count as u128)
        .sum();
    (sum_of_squares as f64).sqrt()
}

/// Reusable similarity pipeline: parser, generator and an optional frequency cache.
pub struct SimilarityCalculator<P: TextParser = WordCharParser> {
    parser: P,
    generator: NGramGenerator,
    cache: Option<FrequencyCache>,
}

impl SimilarityCalculator<WordCharParser> {
    pub fn new(config: &SimcheckConfig) -> Result<Self> {
        let cache = FrequencyCache::from_config(&config.cache)?;
        Self::with_parser(WordCharParser::new(), &config.generator, cache)
    }

    /// Uncached calculator for the given ngram size.
    pub fn with_ngram_size(ngram_size: usize) -> Result<Self> {
        Ok(Self {
            parser: WordCharParser::new(),
            generator: NGramGenerator::with_size(ngram_size)?,
            cache: None,
        })
    }
}

impl Default for SimilarityCalculator<WordCharParser> {
    fn default() -> Self {
        Self {
            parser: WordCharParser::new(),
            generator: NGramGenerator {
                config: NGramConfig { ngram_size: DEFAULT_NGRAM_SIZE },
            },
            cache: None,
        }
    }
}

impl<P: TextParser> SimilarityCalculator<P> {
    pub fn with_parser(parser: P, config: &GeneratorConfig, cache: Option<FrequencyCache>) -> Result<Self> {
        let generator = NGramGenerator::new(config.ngram_config())?;
        debug!("Similarity calculator ready (ngram size {}, cache {})",
            generator.ngram_size(),
            if cache.is_some() { "enabled" } else { "disabled" });
        Ok(Self { parser, generator, cache })
    }

    pub fn ngram_size(&self) -> usize {
        self.generator.ngram_size()
    }

    /// Frequency map of a raw text, served from the cache when one is configured.
    pub fn frequencies(&self, raw_text: &str) -> Result<Arc<FrequencyMap>> {
        let compute = || -> Result<FrequencyMap> {
            Ok(self.generator.frequencies(&self.parser.clean_text(raw_text)))
        };
        match &self.cache {
            Some(cache) => cache.get_or_compute(raw_text, self.ngram_size(), compute),
            None => compute().map(Arc::new),
        }
    }

    pub fn compare_texts(&self, source: &str, target: &str) -> Result<f64> {
        Ok(self.compare_texts_detailed(source, target)?.similarity)
    }

    pub fn compare_texts_detailed(&self, source: &str, target: &str) -> Result<SimilarityBreakdown> {
        // Text that normalizes to nothing yields an empty map, which scores 0 below
        let source_freqs = self.frequencies(source)?;
        let target_freqs = self.frequencies(target)?;

        let breakdown = compare_frequencies(&source_freqs, &target_freqs, self.ngram_size());
        debug!("Compared {} vs {} distinct ngrams, {} shared, similarity {:.4}",
            breakdown.source_distinct,
            breakdown.target_distinct,
            breakdown.shared_distinct,
            breakdown.similarity);
        Ok(breakdown)
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(FrequencyCache::stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::ngram::ngram_frequencies;

    #[test]
    fn test_identical_texts() {
        let text = "Python 是一门优秀的编程语言，简单易学。";
        let score = cosine_similarity(text, text, 2).unwrap();
        assert!((score - 1.0).abs() < 1e-9, "identical texts scored {}", score);
    }

    #[test]
    fn test_disjoint_texts() {
        let score = cosine_similarity("Apple banana orange grape", "汽车 飞机 火车 轮船", 2).unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_known_values() {
        // ab, bc shared out of three bigrams each
        let score = cosine_similarity("abcd", "abce", 2).unwrap();
        assert!((score - 2.0 / 3.0).abs() < 1e-12);

        let score = cosine_similarity("hello world", "hello there", 2).unwrap();
        assert!((score - 0.5477225575051661).abs() < 1e-9);
    }

    #[test]
    fn test_empty_and_short_inputs() {
        assert_eq!(cosine_similarity("正常文本", "", 2).unwrap(), 0.0);
        assert_eq!(cosine_similarity("", "", 2).unwrap(), 0.0);
        assert_eq!(cosine_similarity("!!!", "abc", 2).unwrap(), 0.0);
        assert_eq!(cosine_similarity("ab", "ab", 3).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_ngram_size_fails_fast() {
        assert!(matches!(cosine_similarity("abc", "abc", 0), Err(Error::InvalidArgument(_))));
        assert!(SimilarityCalculator::with_ngram_size(0).is_err());
    }

    #[test]
    fn test_symmetry_is_exact() {
        let a = "The quick brown fox jumps over the lazy dog";
        let b = "A quick brown dog jumps over the lazy fox, twice!";
        for n in 1..=4 {
            assert_eq!(
                cosine_similarity(a, b, n).unwrap(),
                cosine_similarity(b, a, n).unwrap()
            );
        }
    }

    #[test]
    fn test_breakdown_sums() {
        let a = ngram_frequencies("abab", 2).unwrap();
        let b = ngram_frequencies("abc", 2).unwrap();
        let breakdown = compare_frequencies(&a, &b, 2);

        // a = {ab:2, ba:1}, b = {ab:1, bc:1}
        assert_eq!(breakdown.dot_product, 2);
        assert_eq!(breakdown.shared_distinct, 1);
        assert!((breakdown.source_magnitude - 5f64.sqrt()).abs() < 1e-12);
        assert!((breakdown.target_magnitude - 2f64.sqrt()).abs() < 1e-12);
        assert!((breakdown.similarity - 2.0 / 10f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_empty_maps_score_zero() {
        let empty = FrequencyMap::new();
        let full = ngram_frequencies("abc", 2).unwrap();
        assert_eq!(cosine_from_frequencies(&empty, &full), 0.0);
        assert_eq!(cosine_from_frequencies(&full, &empty), 0.0);
    }

    #[test]
    fn test_calculator_matches_free_function() {
        let calculator = SimilarityCalculator::with_ngram_size(3).unwrap();
        let a = "Plagiarism screening compares documents.";
        let b = "Screening for plagiarism compares two documents!";
        assert_eq!(
            calculator.compare_texts(a, b).unwrap(),
            cosine_similarity(a, b, 3).unwrap()
        );
        assert!(calculator.cache_stats().is_none());
    }

    #[test]
    fn test_calculator_uses_cache() {
        let config = SimcheckConfig::default();
        let calculator = SimilarityCalculator::new(&config).unwrap();

        let first = calculator.compare_texts("same text", "other text").unwrap();
        let second = calculator.compare_texts("same text", "other text").unwrap();
        assert_eq!(first, second);

        let stats = calculator.cache_stats().unwrap();
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.hits, 2);
    }

    #[test]
    fn test_default_calculator_uses_bigrams() {
        let calculator: SimilarityCalculator = SimilarityCalculator::default();
        assert_eq!(calculator.ngram_size(), 2);
    }
}
