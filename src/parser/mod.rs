pub mod normalizer;

pub trait TextParser: Sync + Send {
    /// Clean text into its canonical comparison form
    fn clean_text(&self, text: &str) -> String;

    /// Determine if a character survives cleaning
    fn is_countable_char(&self, c: char) -> bool;

    /// Count characters that survive cleaning
    fn count_valid_chars(&self, text: &str) -> usize {
        text.chars().filter(|&c| self.is_countable_char(c)).count()
    }
}

pub use self::normalizer::{normalize, WordCharParser};
