//! Query-side search over the inverted index and current page ranks.

use std::collections::HashSet;
use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::analyzer::Analyzer;
use crate::corpus::page::{Page, PageId};
use crate::error::Result;
use crate::index::InvertedIndex;

/// Answers queries against a built index and the pages' current ranks.
///
/// Queries are normalized through the same analyzer used at indexing time,
/// so case and punctuation differences never matter and stop words can
/// never match. Unmatched queries are ordinary empty results, not errors.
pub struct SearchEngine {
    analyzer: Arc<dyn Analyzer>,
}

impl SearchEngine {
    /// Create a search engine around the analyzer the index was built with.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        SearchEngine { analyzer }
    }

    /// Find every page containing `word`, with occurrence positions,
    /// ordered by page id ascending.
    ///
    /// Returns an empty vector when the word is absent, is a stop word, or
    /// normalizes to nothing (e.g. punctuation only).
    pub fn search_for_word(
        &self,
        index: &InvertedIndex,
        word: &str,
    ) -> Result<Vec<(PageId, Vec<u32>)>> {
        let mut tokens = self.analyzer.analyze(word)?;
        let Some(token) = tokens.next() else {
            return Ok(Vec::new());
        };

        let results = index
            .postings(&token.text)
            .map(|list| {
                list.postings()
                    .iter()
                    .map(|p| (p.page_id, p.positions().to_vec()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(results)
    }

    /// Find the single page best matching a free-text query, or `None`.
    ///
    /// The candidate set is the union of pages matching any query word.
    /// The winner maximizes (distinct matching query words, rank); ties on
    /// both go to the lowest page id for determinism. Duplicate query
    /// words count once.
    pub fn find_best_match(
        &self,
        index: &InvertedIndex,
        pages: &[Page],
        query: &str,
    ) -> Result<Option<PageId>> {
        let mut seen_words: HashSet<String> = HashSet::new();
        let mut match_counts: AHashMap<PageId, usize> = AHashMap::new();

        for token in self.analyzer.analyze(query)? {
            if !seen_words.insert(token.text.clone()) {
                continue;
            }
            if let Some(list) = index.postings(&token.text) {
                for posting in list.postings() {
                    *match_counts.entry(posting.page_id).or_insert(0) += 1;
                }
            }
        }

        // Page ids in the index are indices into `pages`: the index was
        // built from this same slice.
        let best = match_counts.into_iter().max_by(|(id_a, count_a), (id_b, count_b)| {
            count_a
                .cmp(count_b)
                .then_with(|| {
                    let rank_a = pages[*id_a as usize].rank();
                    let rank_b = pages[*id_b as usize].rank();
                    rank_a.total_cmp(&rank_b)
                })
                .then_with(|| id_b.cmp(id_a))
        });

        Ok(best.map(|(id, _)| id))
    }
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}
