// src/ngram/generator/char_ngrams.rs

use std::iter;
use log::trace;

use crate::ngram::types::FrequencyMap;

use super::core::NGramGenerator;

impl NGramGenerator {
    pub(crate) fn count_char_ngrams(&self, text: &str) -> FrequencyMap {
        let ngram_size = self.config.ngram_size;
        let char_count = text.chars().count();

        if char_count < ngram_size {
            trace!("Text too short for ngram size {} (length: {})", ngram_size, char_count);
            return FrequencyMap::new();
        }

        let total_windows = char_count - ngram_size + 1;
        trace!("Counting {} character ngrams of size {}", total_windows, ngram_size);

        // Window i spans from the byte offset of char i to the byte offset of char i + n
        let starts = text.char_indices().map(|(pos, _)| pos);
        let ends = text.char_indices()
            .map(|(pos, _)| pos)
            .skip(ngram_size)
            .chain(iter::once(text.len()));

        let mut freqs = FrequencyMap::with_capacity(total_windows.min(1 << 16));
        for (start, end) in starts.zip(ends) {
            let gram = &text[start..end];
            match freqs.get_mut(gram) {
                Some(count) => *count += 1,
                None => {
                    freqs.insert(gram.to_owned(), 1);
                }
            }
        }

        trace!("Counted {} distinct ngrams", freqs.len());
        freqs
    }
}
