//! Posting lists for the inverted index.

use crate::corpus::page::PageId;

/// A single posting: one page containing a term, with the positions of
/// every occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    /// Page ID.
    pub page_id: PageId,
    /// Positions of the term in the page's tokenized body, 0-based,
    /// strictly increasing, never empty.
    pub positions: Vec<u32>,
}

impl Posting {
    /// Create a posting with an initial occurrence position.
    pub fn new(page_id: PageId, position: u32) -> Self {
        Posting {
            page_id,
            positions: vec![position],
        }
    }

    /// Record another occurrence of the term in this page.
    pub fn add_position(&mut self, position: u32) {
        debug_assert!(
            self.positions.last().is_none_or(|&last| position > last),
            "positions must be strictly increasing"
        );
        self.positions.push(position);
    }

    /// Term frequency in this page.
    pub fn frequency(&self) -> u32 {
        self.positions.len() as u32
    }

    /// The occurrence positions.
    pub fn positions(&self) -> &[u32] {
        &self.positions
    }
}

/// A posting list for a specific term, kept sorted by page id so that
/// lookups come back in id order without re-sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    postings: Vec<Posting>,
}

impl PostingList {
    /// Create a new empty posting list.
    pub fn new() -> Self {
        PostingList {
            postings: Vec::new(),
        }
    }

    /// Record an occurrence of the term at `position` in `page_id`.
    pub fn add_occurrence(&mut self, page_id: PageId, position: u32) {
        match self
            .postings
            .binary_search_by_key(&page_id, |p| p.page_id)
        {
            Ok(index) => self.postings[index].add_position(position),
            Err(index) => self.postings.insert(index, Posting::new(page_id, position)),
        }
    }

    /// The postings, ordered by page id ascending.
    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    /// Number of pages containing the term.
    pub fn doc_frequency(&self) -> u64 {
        self.postings.len() as u64
    }

    /// Total number of occurrences across all pages.
    pub fn total_frequency(&self) -> u64 {
        self.postings.iter().map(|p| p.frequency() as u64).sum()
    }

    /// Check if the list has no postings.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}
