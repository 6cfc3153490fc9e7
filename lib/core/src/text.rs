//! Text normalization and tokenization.

use ahash::AHashSet;

/// Case-fold a raw field value for comparison.
///
/// Both the edit-distance scorer and the tokenizer run on normalized
/// text, so `"DUNE"` and `"dune"` compare as identical.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Splits normalized text into alphanumeric tokens.
///
/// Tokens shorter than `min_token_len` characters and tokens in the
/// stop-word set are dropped. Stop words match case-insensitively.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    min_token_len: usize,
    stop_words: AHashSet<String>,
}

impl Tokenizer {
    /// Tokenizer with no stop words and a minimum token length of 1.
    pub fn new() -> Self {
        Self {
            min_token_len: 1,
            stop_words: AHashSet::new(),
        }
    }

    /// Set the minimum token length in characters.
    #[must_use]
    pub fn with_min_token_len(mut self, min_token_len: usize) -> Self {
        self.min_token_len = min_token_len;
        self
    }

    /// Set the stop-word list. Words are folded to lowercase on ingestion.
    #[must_use]
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words
            .into_iter()
            .map(|w| w.into().to_lowercase())
            .collect();
        self
    }

    /// Split text into lowercase tokens on non-alphanumeric boundaries.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .filter(|token| token.chars().count() >= self.min_token_len)
            .filter(|token| !self.stop_words.contains(*token))
            .map(|token| token.to_string())
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}
