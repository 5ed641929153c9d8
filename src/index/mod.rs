//! Inverted index construction and lookup.
//!
//! The index maps each normalized word to the pages containing it, with
//! the 0-based token positions of every occurrence. It is built exactly
//! once per corpus load and is read-only afterwards. Stop words never
//! appear as keys because the analyzer removes them before indexing.

pub mod posting;

use std::collections::BTreeMap;

use ahash::AHashMap;

use crate::analysis::analyzer::Analyzer;
use crate::corpus::page::{Page, PageId};
use crate::error::Result;

pub use posting::{Posting, PostingList};

/// A positional inverted index over the bodies of a corpus's pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvertedIndex {
    terms: AHashMap<String, PostingList>,
}

impl InvertedIndex {
    /// Build the index over `pages`, tokenizing each body through
    /// `analyzer`. Deterministic and idempotent: the same pages and
    /// analyzer always produce an identical index.
    pub fn build(pages: &[Page], analyzer: &dyn Analyzer) -> Result<InvertedIndex> {
        let mut terms: AHashMap<String, PostingList> = AHashMap::new();

        for page in pages {
            for token in analyzer.analyze(page.body())? {
                terms
                    .entry(token.text)
                    .or_default()
                    .add_occurrence(page.id(), token.position as u32);
            }
        }

        Ok(InvertedIndex { terms })
    }

    /// Get the posting list for a normalized term, if any page contains it.
    pub fn postings(&self, term: &str) -> Option<&PostingList> {
        self.terms.get(term)
    }

    /// Check whether a normalized term occurs anywhere in the corpus.
    pub fn contains_term(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// Number of distinct terms in the index.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Check if the index has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Flatten into an ordered map of term to (page id, positions) pairs.
    /// Used for debugging dumps; ordering makes the output stable.
    pub fn to_sorted_map(&self) -> BTreeMap<String, Vec<(PageId, Vec<u32>)>> {
        self.terms
            .iter()
            .map(|(term, list)| {
                let entries = list
                    .postings()
                    .iter()
                    .map(|p| (p.page_id, p.positions().to_vec()))
                    .collect();
                (term.clone(), entries)
            })
            .collect()
    }
}
