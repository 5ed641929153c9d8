//! Analyzer implementations that combine tokenizers and filters.

use std::fmt;
use std::sync::Arc;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{Filter, LowercaseFilter, StopFilter};
use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer};
use crate::error::Result;

/// Trait for analyzers that convert raw text into a normalized token stream.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text into a stream of normalized tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A configurable analyzer that combines a tokenizer with a chain of filters.
///
/// Filters are applied sequentially in the order they were added.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use xiphos::analysis::analyzer::{Analyzer, PipelineAnalyzer};
/// use xiphos::analysis::token_filter::{LowercaseFilter, StopFilter};
/// use xiphos::analysis::tokenizer::RegexTokenizer;
///
/// let tokenizer = Arc::new(RegexTokenizer::new().unwrap());
/// let analyzer = PipelineAnalyzer::new(tokenizer)
///     .add_filter(Arc::new(LowercaseFilter::new()))
///     .add_filter(Arc::new(StopFilter::from_words(vec!["the", "and"])));
///
/// let tokens: Vec<_> = analyzer.analyze("Hello THE world AND test").unwrap().collect();
///
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[0].text, "hello");
/// assert_eq!(tokens[1].text, "world");
/// assert_eq!(tokens[2].text, "test");
/// ```
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

impl fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// The standard analyzer for page bodies and queries.
///
/// Combines the `\w+` regex tokenizer with lowercasing and stop word
/// removal. Both indexing and search use this analyzer, which is what
/// guarantees identical normalization on both sides.
pub struct PageAnalyzer {
    inner: PipelineAnalyzer,
}

impl PageAnalyzer {
    /// Create a page analyzer with the default stop words.
    pub fn new() -> Result<Self> {
        Self::build(StopFilter::new())
    }

    /// Create a page analyzer with a custom stop word list.
    pub fn with_stop_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(StopFilter::from_words(words))
    }

    fn build(stop_filter: StopFilter) -> Result<Self> {
        let tokenizer = Arc::new(RegexTokenizer::new()?);
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(stop_filter))
            .with_name("page".to_string());

        Ok(Self { inner: analyzer })
    }
}

impl Default for PageAnalyzer {
    fn default() -> Self {
        Self::new().expect("Page analyzer should be creatable with default settings")
    }
}

impl Analyzer for PageAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "page"
    }
}

impl fmt::Debug for PageAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_pipeline_analyzer() {
        let tokenizer = Arc::new(RegexTokenizer::new().unwrap());
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StopFilter::from_words(vec!["the", "and"])));

        let tokens: Vec<Token> = analyzer
            .analyze("Hello THE world AND test")
            .unwrap()
            .collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "world");
        assert_eq!(tokens[2].text, "test");
    }

    #[test]
    fn test_page_analyzer() {
        let analyzer = PageAnalyzer::new().unwrap();

        let tokens: Vec<Token> = analyzer.analyze("The Fish and that Cat").unwrap().collect();

        // "the", "and", "that" are stop words; positions are kept
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "fish");
        assert_eq!(tokens[0].position, 1);
        assert_eq!(tokens[1].text, "cat");
        assert_eq!(tokens[1].position, 4);
    }

    #[test]
    fn test_page_analyzer_custom_stop_words() {
        let analyzer = PageAnalyzer::with_stop_words(vec!["fish"]).unwrap();

        let tokens: Vec<Token> = analyzer.analyze("the fish cat").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "the");
        assert_eq!(tokens[1].text, "cat");
    }

    #[test]
    fn test_page_analyzer_name() {
        let analyzer = PageAnalyzer::new().unwrap();
        assert_eq!(analyzer.name(), "page");
    }
}
