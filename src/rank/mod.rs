//! Random-surfer rank simulation.
//!
//! The engine consumes one discrete step per call: it picks a page with
//! the surfer policy (follow a random outbound link of the previous page,
//! or restart to a uniformly random page), credits the visit, and
//! recomputes every page's rank as its share of all visits. Over many
//! steps the visit distribution converges toward the stationary
//! distribution of the link graph with teleportation, which is what
//! PageRank measures. The engine never terminates on its own; the driver
//! decides how many steps to run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::corpus::page::{Page, PageId};
use crate::error::{Result, XiphosError};

/// Configuration for the random surfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankConfig {
    /// Probability of jumping to a uniformly random page instead of
    /// following a link (the damping factor of the PageRank literature).
    /// Keeps the walk from being trapped in a sink or cycle.
    pub restart_probability: f64,
    /// Random seed for a reproducible walk.
    pub seed: u64,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            restart_probability: 0.15,
            seed: 7,
        }
    }
}

impl RankConfig {
    /// Create a new rank configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the restart probability.
    pub fn with_restart_probability(mut self, restart_probability: f64) -> Self {
        self.restart_probability = restart_probability;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.restart_probability) {
            return Err(XiphosError::invalid_config(format!(
                "restart_probability ({}) must be in [0, 1]",
                self.restart_probability
            )));
        }
        Ok(())
    }
}

/// The random-surfer engine.
///
/// Idle until the first [`step`](RankEngine::step); iterating afterwards.
/// On the first step it snapshots the corpus's initial visit credit so
/// that ranks sum to exactly 1 after every step.
#[derive(Debug)]
pub struct RankEngine {
    config: RankConfig,
    rng: StdRng,
    previous: Option<PageId>,
    total_steps: u64,
    initial_credit: u64,
}

impl RankEngine {
    /// Create a new rank engine with the given configuration.
    pub fn new(config: RankConfig) -> Result<Self> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed);

        Ok(RankEngine {
            config,
            rng,
            previous: None,
            total_steps: 0,
            initial_credit: 0,
        })
    }

    /// Get the engine's configuration.
    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Whether no steps have been taken yet.
    pub fn is_idle(&self) -> bool {
        self.total_steps == 0
    }

    /// Number of steps taken so far. Increases by exactly 1 per
    /// [`step`](RankEngine::step).
    pub fn total_steps_taken(&self) -> u64 {
        self.total_steps
    }

    /// Perform one random-surfer step over `pages`.
    ///
    /// Selects a page (uniform on the first step; afterwards a random
    /// outbound link of the previous page, or a uniform restart with the
    /// configured probability, and always a restart when the previous
    /// page has no outbound links), credits the visit, and recomputes
    /// every page's rank. Returns the visited page's id.
    ///
    /// Fails with `EmptyCorpus` when `pages` is empty.
    pub fn step(&mut self, pages: &mut [Page]) -> Result<PageId> {
        if pages.is_empty() {
            return Err(XiphosError::empty_corpus(
                "cannot step the rank engine over zero pages",
            ));
        }

        if self.total_steps == 0 {
            self.initial_credit = pages.iter().map(|p| p.visit_count()).sum();
        }

        let visited = self.select_next(pages);
        pages[visited as usize].record_visit();
        self.total_steps += 1;
        self.previous = Some(visited);

        let total_visits = self.initial_credit + self.total_steps;
        for page in pages.iter_mut() {
            page.recalculate_rank(total_visits);
        }

        Ok(visited)
    }

    /// Run `steps` consecutive steps. The engine is not self-terminating;
    /// this is a convenience for drivers that don't interleave work.
    pub fn run(&mut self, pages: &mut [Page], steps: u64) -> Result<()> {
        for _ in 0..steps {
            self.step(pages)?;
        }
        Ok(())
    }

    fn select_next(&mut self, pages: &[Page]) -> PageId {
        if let Some(previous) = self.previous {
            let links = pages[previous as usize].outbound_links();
            if !links.is_empty() && !self.rng.random_bool(self.config.restart_probability) {
                return links[self.rng.random_range(0..links.len())];
            }
        }
        self.rng.random_range(0..pages.len()) as PageId
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::page::Page;

    fn make_page(id: PageId, links: Vec<PageId>) -> Page {
        let record = format!("<title>Page {id}</title><body>body {id}</body>");
        let mut page = Page::from_record(id, &record).unwrap();
        page.set_outbound_links(links);
        page
    }

    fn rank_sum(pages: &[Page]) -> f64 {
        pages.iter().map(|p| p.rank()).sum()
    }

    #[test]
    fn test_step_on_empty_corpus_fails() {
        let mut engine = RankEngine::new(RankConfig::default()).unwrap();
        let err = engine.step(&mut []).unwrap_err();
        assert!(matches!(err, XiphosError::EmptyCorpus(_)));
    }

    #[test]
    fn test_total_steps_increases_by_one() {
        let mut engine = RankEngine::new(RankConfig::default()).unwrap();
        let mut pages = vec![make_page(0, vec![1]), make_page(1, vec![0])];

        assert!(engine.is_idle());
        for expected in 1..=50 {
            engine.step(&mut pages).unwrap();
            assert_eq!(engine.total_steps_taken(), expected);
        }
        assert!(!engine.is_idle());
    }

    #[test]
    fn test_rank_conservation_every_step() {
        let mut engine = RankEngine::new(RankConfig::default()).unwrap();
        let mut pages = vec![
            make_page(0, vec![1, 2]),
            make_page(1, vec![2]),
            make_page(2, vec![0]),
        ];

        for _ in 0..500 {
            engine.step(&mut pages).unwrap();
            assert!((rank_sum(&pages) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_page_rank_converges_to_one() {
        let mut engine = RankEngine::new(RankConfig::default()).unwrap();
        let mut pages = vec![make_page(0, vec![])];

        for _ in 0..100 {
            engine.step(&mut pages).unwrap();
        }

        assert!((pages[0].rank() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sink_falls_back_to_restart() {
        // Page 1 is a sink; with restart probability 0 the walk can only
        // leave it through the sink fallback. No panic, no infinite loop.
        let config = RankConfig::default().with_restart_probability(0.0);
        let mut engine = RankEngine::new(config).unwrap();
        let mut pages = vec![make_page(0, vec![1]), make_page(1, vec![])];

        for _ in 0..200 {
            engine.step(&mut pages).unwrap();
        }

        // The sink bounced the walk back out at least once
        assert!(pages[0].visit_count() > 1);
        assert!(pages[1].visit_count() > 1);
    }

    #[test]
    fn test_walk_is_deterministic_under_seed() {
        let mut counts_a = Vec::new();
        let mut counts_b = Vec::new();
        for counts in [&mut counts_a, &mut counts_b] {
            let config = RankConfig::default().with_seed(99);
            let mut engine = RankEngine::new(config).unwrap();
            let mut pages = vec![
                make_page(0, vec![1]),
                make_page(1, vec![2]),
                make_page(2, vec![0, 1]),
            ];
            engine.run(&mut pages, 300).unwrap();
            *counts = pages.iter().map(|p| p.visit_count()).collect::<Vec<_>>();
        }

        assert_eq!(counts_a, counts_b);
    }

    #[test]
    fn test_visits_follow_link_structure() {
        // Pages 0 and 1 both link only to 2; 2 links back to 0. Page 2
        // should collect the most visits.
        let config = RankConfig::default().with_seed(5);
        let mut engine = RankEngine::new(config).unwrap();
        let mut pages = vec![
            make_page(0, vec![2]),
            make_page(1, vec![2]),
            make_page(2, vec![0]),
        ];

        engine.run(&mut pages, 2000).unwrap();

        assert!(pages[2].rank() > pages[0].rank());
        assert!(pages[2].rank() > pages[1].rank());
    }

    #[test]
    fn test_invalid_restart_probability() {
        let config = RankConfig::default().with_restart_probability(1.5);
        assert!(RankEngine::new(config).is_err());
    }
}
