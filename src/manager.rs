//! The page manager: single owner of pages, index, and engines.
//!
//! Construction runs the whole load pipeline: read records, build the
//! corpus (links, placements, pruning), build the inverted index exactly
//! once, and set up the search and rank engines. Afterwards the manager
//! is the one facade callers talk to: queries read the index and current
//! ranks; `step` advances the random surfer. Everything is synchronous
//! and single-threaded; the caller paces the stepping.

use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, PageAnalyzer};
use crate::analysis::token_filter::DEFAULT_STOP_WORDS;
use crate::corpus::config::CorpusConfig;
use crate::corpus::loader::{Corpus, CorpusLoader};
use crate::corpus::page::{Page, PageId};
use crate::corpus::placement::Placement;
use crate::error::Result;
use crate::index::InvertedIndex;
use crate::rank::{RankConfig, RankEngine};
use crate::search::SearchEngine;

/// Configuration for the page manager, covering all tunables of the core:
/// corpus loading, ranking, and the stop word list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageManagerConfig {
    /// Corpus loading configuration (link bounds, canvas, pruning, seed).
    pub corpus: CorpusConfig,
    /// Random-surfer configuration (restart probability, seed).
    pub rank: RankConfig,
    /// Words excluded from indexing and search.
    pub stop_words: Vec<String>,
}

impl Default for PageManagerConfig {
    fn default() -> Self {
        Self {
            corpus: CorpusConfig::default(),
            rank: RankConfig::default(),
            stop_words: DEFAULT_STOP_WORDS.iter().map(|&s| s.to_string()).collect(),
        }
    }
}

impl PageManagerConfig {
    /// Create a new page manager configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the corpus configuration.
    pub fn with_corpus(mut self, corpus: CorpusConfig) -> Self {
        self.corpus = corpus;
        self
    }

    /// Set the rank configuration.
    pub fn with_rank(mut self, rank: RankConfig) -> Self {
        self.rank = rank;
        self
    }

    /// Replace the stop word list.
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(|s| s.into()).collect();
        self
    }
}

/// Owns the corpus, the inverted index, and both engines for the process
/// lifetime. No other component creates or destroys pages.
#[derive(Debug)]
pub struct PageManager {
    corpus: Corpus,
    index: InvertedIndex,
    search: SearchEngine,
    rank: RankEngine,
}

impl PageManager {
    /// Load a corpus from a file and build all engine state.
    pub fn from_path<P: AsRef<Path>>(path: P, config: PageManagerConfig) -> Result<Self> {
        let loader = CorpusLoader::new(config.corpus.clone())?;
        let corpus = loader.load_from_path(path)?;
        Self::from_corpus(corpus, config)
    }

    /// Load a corpus from any buffered reader and build all engine state.
    pub fn from_reader<R: BufRead>(reader: R, config: PageManagerConfig) -> Result<Self> {
        let loader = CorpusLoader::new(config.corpus.clone())?;
        let corpus = loader.load_from_reader(reader)?;
        Self::from_corpus(corpus, config)
    }

    fn from_corpus(corpus: Corpus, config: PageManagerConfig) -> Result<Self> {
        let analyzer: Arc<dyn Analyzer> =
            Arc::new(PageAnalyzer::with_stop_words(config.stop_words)?);
        let index = InvertedIndex::build(corpus.pages(), analyzer.as_ref())?;
        let search = SearchEngine::new(analyzer);
        let rank = RankEngine::new(config.rank)?;

        Ok(PageManager {
            corpus,
            index,
            search,
            rank,
        })
    }

    /// Number of pages in the corpus.
    pub fn num_pages(&self) -> usize {
        self.corpus.len()
    }

    /// All pages, ordered by id.
    pub fn pages(&self) -> &[Page] {
        self.corpus.pages()
    }

    /// Look up a page by id.
    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.corpus.page(id)
    }

    /// Canvas placements, ordered by page id. For the rendering layer.
    pub fn placements(&self) -> &[Placement] {
        self.corpus.placements()
    }

    /// The inverted index.
    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// Find every page containing `word`, with occurrence positions,
    /// ordered by page id ascending. Empty when unmatched.
    pub fn search_for_word(&self, word: &str) -> Result<Vec<(PageId, Vec<u32>)>> {
        self.search.search_for_word(&self.index, word)
    }

    /// Find the page best matching a free-text query, or `None`.
    pub fn find_best_match(&self, query: &str) -> Result<Option<PageId>> {
        self.search
            .find_best_match(&self.index, self.corpus.pages(), query)
    }

    /// Advance the random surfer by one step. Returns the visited page id.
    pub fn step(&mut self) -> Result<PageId> {
        self.rank.step(self.corpus.pages_mut())
    }

    /// Run `steps` consecutive surfer steps.
    pub fn run_ranking(&mut self, steps: u64) -> Result<()> {
        self.rank.run(self.corpus.pages_mut(), steps)
    }

    /// Number of surfer steps taken so far.
    pub fn total_steps_taken(&self) -> u64 {
        self.rank.total_steps_taken()
    }
}
