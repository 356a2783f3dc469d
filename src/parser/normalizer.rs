// Word-character normalizer shared by every similarity computation

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use super::TextParser;

lazy_static! {
    // Unicode-aware: \w covers letters, digits, marks and connector punctuation
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").unwrap();
    static ref WORD_CHAR: Regex = Regex::new(r"^\w$").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Strip punctuation, lower-case and collapse whitespace.
///
/// The result holds only word characters separated by single ASCII spaces,
/// with no leading or trailing space. Applying it twice changes nothing.
pub fn normalize(text: &str) -> String {
    let stripped = NON_WORD.replace_all(text, "");
    let lowered = stripped.to_lowercase();
    let collapsed = WHITESPACE.replace_all(&lowered, " ");
    let cleaned = collapsed.trim().to_string();

    trace!("Normalized {} bytes into {} bytes", text.len(), cleaned.len());
    cleaned
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WordCharParser;

impl WordCharParser {
    pub fn new() -> Self {
        Self
    }
}

impl TextParser for WordCharParser {
    fn clean_text(&self, text: &str) -> String {
        normalize(text)
    }

    fn is_countable_char(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        WORD_CHAR.is_match(c.encode_utf8(&mut buf))
    }
}
