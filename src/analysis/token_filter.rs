//! Token filter implementations.
//!
//! Filters transform a token stream after tokenization. The lowercase
//! filter normalizes case; the stop filter removes configured common words.
//! Removing a stop word does not renumber the remaining tokens, so indexed
//! positions always refer to the full tokenized sequence.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Filter the given token stream, producing a new one.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A filter that lowercases all token text.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered: Vec<Token> = tokens
            .map(|token| {
                let lowered = token.text.to_lowercase();
                token.with_text(lowered)
            })
            .collect();

        Ok(Box::new(filtered.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

/// Default stop words.
///
/// Common words excluded from indexing and search; extend via
/// [`StopFilter::from_words`] or the manager configuration.
pub const DEFAULT_STOP_WORDS: &[&str] = &["the", "and", "that"];

/// Default stop words as a HashSet.
pub static DEFAULT_STOP_WORDS_SET: LazyLock<HashSet<String>> =
    LazyLock::new(|| DEFAULT_STOP_WORDS.iter().map(|&s| s.to_string()).collect());

/// A filter that removes stop words from the token stream.
///
/// Stop words are common words (like "the" or "and") that are filtered out
/// during analysis because they don't contribute to search relevance.
///
/// # Examples
///
/// ```
/// use xiphos::analysis::token::Token;
/// use xiphos::analysis::token_filter::{Filter, StopFilter};
///
/// let filter = StopFilter::new();
/// let tokens = vec![
///     Token::new("the", 0),
///     Token::new("quick", 1),
///     Token::new("fox", 2),
/// ];
///
/// let result: Vec<_> = filter
///     .filter(Box::new(tokens.into_iter()))
///     .unwrap()
///     .collect();
///
/// // "the" is removed; the survivors keep their original positions
/// assert_eq!(result.len(), 2);
/// assert_eq!(result[0].text, "quick");
/// assert_eq!(result[0].position, 1);
/// ```
#[derive(Clone, Debug)]
pub struct StopFilter {
    /// The set of stop words to remove
    stop_words: Arc<HashSet<String>>,
}

impl StopFilter {
    /// Create a new stop filter with the default stop words.
    pub fn new() -> Self {
        Self::with_stop_words(DEFAULT_STOP_WORDS_SET.clone())
    }

    /// Create a new stop filter with a custom stop word set.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        StopFilter {
            stop_words: Arc::new(stop_words),
        }
    }

    /// Create a new stop filter from a list of stop words.
    ///
    /// # Examples
    ///
    /// ```
    /// use xiphos::analysis::token_filter::StopFilter;
    ///
    /// let filter = StopFilter::from_words(vec!["foo", "bar", "baz"]);
    /// assert_eq!(filter.len(), 3);
    /// ```
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stop_words = words.into_iter().map(|s| s.into()).collect();
        Self::with_stop_words(stop_words)
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered: Vec<Token> = tokens
            .filter(|token| !self.is_stop_word(&token.text))
            .collect();

        Ok(Box::new(filtered.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_lowercase_filter() {
        let filter = LowercaseFilter::new();
        let tokens = vec![Token::new("Hello", 0), Token::new("WORLD", 1)];

        let result: Vec<Token> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].text, "hello");
        assert_eq!(result[1].text, "world");
    }

    #[test]
    fn test_stop_filter() {
        let filter = StopFilter::from_words(vec!["the", "and", "or"]);
        let tokens = vec![
            Token::new("hello", 0),
            Token::new("the", 1),
            Token::new("world", 2),
            Token::new("and", 3),
            Token::new("test", 4),
        ];

        let result: Vec<Token> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "hello");
        assert_eq!(result[1].text, "world");
        assert_eq!(result[2].text, "test");
    }

    #[test]
    fn test_stop_filter_preserves_positions() {
        let filter = StopFilter::new();
        let tokens = vec![
            Token::new("the", 0),
            Token::new("fish", 1),
            Token::new("and", 2),
            Token::new("cat", 3),
        ];

        let result: Vec<Token> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].position, 1);
        assert_eq!(result[1].position, 3);
    }

    #[test]
    fn test_default_stop_words() {
        let filter = StopFilter::new();
        assert!(filter.is_stop_word("the"));
        assert!(filter.is_stop_word("and"));
        assert!(filter.is_stop_word("that"));
        assert!(!filter.is_stop_word("fish"));
    }

    #[test]
    fn test_filter_names() {
        assert_eq!(LowercaseFilter::new().name(), "lowercase");
        assert_eq!(StopFilter::new().name(), "stop");
    }
}
