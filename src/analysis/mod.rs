//! Text analysis pipeline: tokenization and token filtering.
//!
//! Page bodies and query strings both flow through the same pipeline so
//! that indexed terms and looked-up terms are normalized identically:
//! a regex tokenizer splits on word boundaries, a lowercase filter
//! normalizes case, and a stop filter drops configured common words.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, PageAnalyzer, PipelineAnalyzer};
pub use token::{Token, TokenStream};
pub use token_filter::{Filter, LowercaseFilter, StopFilter};
pub use tokenizer::{RegexTokenizer, Tokenizer};
