//! Corpus loading: record parsing, link generation, and pruning.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};

use crate::corpus::config::CorpusConfig;
use crate::corpus::page::{Page, PageId};
use crate::corpus::placement::{self, Placement};
use crate::error::{Result, XiphosError};

/// A fully loaded corpus: pages plus their canvas placements, both keyed
/// by page id.
#[derive(Debug, Clone)]
pub struct Corpus {
    pages: Vec<Page>,
    placements: Vec<Placement>,
}

impl Corpus {
    /// All pages, ordered by id.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub(crate) fn pages_mut(&mut self) -> &mut [Page] {
        &mut self.pages
    }

    /// All placements, ordered by page id.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Look up a page by id.
    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.get(id as usize)
    }

    /// Number of pages in the corpus.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if the corpus has no pages. The loader never produces one.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Reads raw page records and produces a [`Corpus`].
///
/// Loading is a one-shot pipeline: parse every record in order, sample
/// placements, generate the random link graph over the full id space, then
/// run the distance-weighted pruning pass. All randomness comes from a
/// single `StdRng` seeded from the configuration, so the same input and
/// seed always yield the same corpus.
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    config: CorpusConfig,
}

impl CorpusLoader {
    /// Create a new loader with the given configuration.
    pub fn new(config: CorpusConfig) -> Result<Self> {
        config.validate()?;
        Ok(CorpusLoader { config })
    }

    /// Get the loader's configuration.
    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// Load a corpus from a file with one page record per line.
    pub fn load_from_path<P: AsRef<Path>>(&self, path: P) -> Result<Corpus> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            XiphosError::corpus_load(format!("cannot open {}: {e}", path.display()))
        })?;
        self.load_from_reader(BufReader::new(file))
    }

    /// Load a corpus from any buffered reader, one page record per line.
    /// Blank lines are skipped. A source that yields zero pages fails with
    /// `CorpusLoadError`.
    pub fn load_from_reader<R: BufRead>(&self, reader: R) -> Result<Corpus> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);

        let mut pages = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let raw = line.trim();
            if raw.is_empty() {
                continue;
            }
            let id = pages.len() as PageId;
            pages.push(Page::from_record(id, raw)?);
        }

        if pages.is_empty() {
            return Err(XiphosError::corpus_load("corpus source contained no pages"));
        }

        let placements = placement::sample_placements(pages.len(), &self.config, &mut rng);
        self.generate_links(&mut pages, &mut rng);
        self.prune_links(&mut pages, &placements, &mut rng);

        // Uniform rank prior: one initial visit per page
        let initial_visits: u64 = pages.iter().map(|p| p.visit_count()).sum();
        for page in &mut pages {
            page.recalculate_rank(initial_visits);
        }

        Ok(Corpus { pages, placements })
    }

    /// Give every page a set of distinct, non-self outbound links, sized
    /// uniformly within the configured bounds (clamped to the id space).
    fn generate_links(&self, pages: &mut [Page], rng: &mut StdRng) {
        let num_pages = pages.len();
        let candidates = num_pages - 1;

        for page in pages.iter_mut() {
            let want = rng
                .random_range(self.config.min_links..=self.config.max_links)
                .min(candidates);
            // Draw from the id space with the page's own id removed, then
            // shift the draws at or above it back up.
            let links: Vec<PageId> = sample(rng, candidates, want)
                .into_iter()
                .map(|index| {
                    let index = index as PageId;
                    if index >= page.id() { index + 1 } else { index }
                })
                .collect();
            page.set_outbound_links(links);
        }
    }

    /// Remove each link with probability proportional to the distance
    /// between source and target, scaled by the canvas diagonal and the
    /// configured strength. A page that had links always keeps at least
    /// one: if the pass would empty the list, the nearest target survives.
    fn prune_links(&self, pages: &mut [Page], placements: &[Placement], rng: &mut StdRng) {
        let diagonal = self.config.canvas_diagonal();

        for page in pages.iter_mut() {
            let links = page.outbound_links().to_vec();
            if links.is_empty() {
                continue;
            }
            let source = placements[page.id() as usize];

            let mut kept = Vec::with_capacity(links.len());
            let mut nearest: Option<(PageId, f64)> = None;
            for target in links {
                let distance = source.distance_to(&placements[target as usize]);
                if nearest.is_none_or(|(_, d)| distance < d) {
                    nearest = Some((target, distance));
                }
                let removal = (self.config.prune_strength * distance / diagonal).clamp(0.0, 1.0);
                if !rng.random_bool(removal) {
                    kept.push(target);
                }
            }
            if kept.is_empty() {
                if let Some((target, _)) = nearest {
                    kept.push(target);
                }
            }
            page.set_outbound_links(kept);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, body: &str) -> String {
        format!("<title>{title}</title><body>{body}</body>")
    }

    fn corpus_text(num_pages: usize) -> String {
        (0..num_pages)
            .map(|i| record(&format!("Page {i}"), &format!("body of page {i}")))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_load_assigns_sequential_ids() {
        let loader = CorpusLoader::new(CorpusConfig::default()).unwrap();
        let corpus = loader.load_from_reader(corpus_text(5).as_bytes()).unwrap();

        assert_eq!(corpus.len(), 5);
        for (i, page) in corpus.pages().iter().enumerate() {
            assert_eq!(page.id() as usize, i);
            assert_eq!(page.title(), format!("Page {i}"));
        }
    }

    #[test]
    fn test_load_skips_blank_lines() {
        let loader = CorpusLoader::new(CorpusConfig::default()).unwrap();
        let text = format!("{}\n\n{}\n", record("A", "a"), record("B", "b"));
        let corpus = loader.load_from_reader(text.as_bytes()).unwrap();

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.page(1).unwrap().title(), "B");
    }

    #[test]
    fn test_empty_source_fails() {
        let loader = CorpusLoader::new(CorpusConfig::default()).unwrap();
        let err = loader.load_from_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, XiphosError::CorpusLoad(_)));

        let err = loader.load_from_reader("\n\n".as_bytes()).unwrap_err();
        assert!(matches!(err, XiphosError::CorpusLoad(_)));
    }

    #[test]
    fn test_missing_file_fails() {
        let loader = CorpusLoader::new(CorpusConfig::default()).unwrap();
        let err = loader
            .load_from_path("/nonexistent/webpages.txt")
            .unwrap_err();
        assert!(matches!(err, XiphosError::CorpusLoad(_)));
    }

    #[test]
    fn test_malformed_record_fails() {
        let loader = CorpusLoader::new(CorpusConfig::default()).unwrap();
        let err = loader
            .load_from_reader("no delimiters here".as_bytes())
            .unwrap_err();
        assert!(matches!(err, XiphosError::MalformedContent(_)));
    }

    #[test]
    fn test_no_self_links() {
        let loader = CorpusLoader::new(CorpusConfig::default()).unwrap();
        let corpus = loader.load_from_reader(corpus_text(20).as_bytes()).unwrap();

        for page in corpus.pages() {
            assert!(!page.outbound_links().contains(&page.id()));
        }
    }

    #[test]
    fn test_links_are_distinct_and_in_range() {
        let loader = CorpusLoader::new(CorpusConfig::default()).unwrap();
        let corpus = loader.load_from_reader(corpus_text(20).as_bytes()).unwrap();

        for page in corpus.pages() {
            let links = page.outbound_links();
            let mut sorted = links.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), links.len(), "duplicate link on {}", page.id());
            for &target in links {
                assert!((target as usize) < corpus.len());
            }
        }
    }

    #[test]
    fn test_pruning_floor() {
        // Maximum pruning strength; every page started with at least one
        // link (min_links = 1), so every page must keep at least one.
        let config = CorpusConfig::default().with_prune_strength(1.0);
        let loader = CorpusLoader::new(config).unwrap();
        let corpus = loader.load_from_reader(corpus_text(20).as_bytes()).unwrap();

        for page in corpus.pages() {
            assert!(
                !page.outbound_links().is_empty(),
                "page {} was pruned to zero links",
                page.id()
            );
        }
    }

    #[test]
    fn test_single_page_corpus_has_no_links() {
        let loader = CorpusLoader::new(CorpusConfig::default()).unwrap();
        let corpus = loader.load_from_reader(corpus_text(1).as_bytes()).unwrap();

        assert_eq!(corpus.len(), 1);
        assert!(corpus.page(0).unwrap().outbound_links().is_empty());
    }

    #[test]
    fn test_load_is_deterministic_under_seed() {
        let config = CorpusConfig::default().with_seed(1234);
        let loader = CorpusLoader::new(config).unwrap();

        let a = loader.load_from_reader(corpus_text(15).as_bytes()).unwrap();
        let b = loader.load_from_reader(corpus_text(15).as_bytes()).unwrap();

        assert_eq!(a.placements(), b.placements());
        for (pa, pb) in a.pages().iter().zip(b.pages()) {
            assert_eq!(pa.outbound_links(), pb.outbound_links());
        }
    }

    #[test]
    fn test_initial_rank_is_uniform() {
        let loader = CorpusLoader::new(CorpusConfig::default()).unwrap();
        let corpus = loader.load_from_reader(corpus_text(4).as_bytes()).unwrap();

        for page in corpus.pages() {
            assert!((page.rank() - 0.25).abs() < 1e-12);
        }
        let sum: f64 = corpus.pages().iter().map(|p| p.rank()).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }
}
