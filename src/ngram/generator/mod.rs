// src/ngram/generator/mod.rs

mod core;
mod char_ngrams;

pub use self::core::{ngram_frequencies, NGramGenerator};
pub(crate) use self::core::validate_ngram_size;
