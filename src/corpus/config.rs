//! Configuration for corpus loading.

use serde::{Deserialize, Serialize};

use crate::error::{Result, XiphosError};

/// Configuration for the corpus loader: link generation bounds, canvas
/// geometry for placements, pruning strength, and the RNG seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Minimum number of outbound links generated per page.
    pub min_links: usize,
    /// Maximum number of outbound links generated per page.
    pub max_links: usize,
    /// Width of the layout canvas.
    pub canvas_width: f64,
    /// Height of the layout canvas.
    pub canvas_height: f64,
    /// Half the side length of a page's box on the canvas.
    pub box_half_size: f64,
    /// Extra spacing added to the minimum distance between placements.
    pub placement_padding: f64,
    /// Scales the distance-proportional link removal probability.
    /// 0 disables pruning, 1 removes the farthest links almost surely.
    pub prune_strength: f64,
    /// Random seed for reproducible link generation, placement, and pruning.
    pub seed: u64,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            min_links: 1,
            max_links: 3,
            canvas_width: 800.0,
            canvas_height: 600.0,
            box_half_size: 15.0,
            placement_padding: 30.0,
            prune_strength: 0.5,
            seed: 42,
        }
    }
}

impl CorpusConfig {
    /// Create a new corpus configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outbound link count bounds.
    pub fn with_link_bounds(mut self, min_links: usize, max_links: usize) -> Self {
        self.min_links = min_links;
        self.max_links = max_links;
        self
    }

    /// Set the pruning strength.
    pub fn with_prune_strength(mut self, prune_strength: f64) -> Self {
        self.prune_strength = prune_strength;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.min_links > self.max_links {
            return Err(XiphosError::invalid_config(format!(
                "min_links ({}) must not exceed max_links ({})",
                self.min_links, self.max_links
            )));
        }
        if !(0.0..=1.0).contains(&self.prune_strength) {
            return Err(XiphosError::invalid_config(format!(
                "prune_strength ({}) must be in [0, 1]",
                self.prune_strength
            )));
        }
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(XiphosError::invalid_config(
                "canvas dimensions must be positive",
            ));
        }
        if self.box_half_size < 0.0 || self.placement_padding < 0.0 {
            return Err(XiphosError::invalid_config(
                "box_half_size and placement_padding must be non-negative",
            ));
        }
        Ok(())
    }

    /// Minimum distance between two placements: two boxes diagonally apart
    /// plus the configured padding.
    pub fn min_placement_distance(&self) -> f64 {
        self.box_half_size * 2.0 * std::f64::consts::SQRT_2 + self.placement_padding
    }

    /// Length of the canvas diagonal, used to normalize pruning distances.
    pub fn canvas_diagonal(&self) -> f64 {
        (self.canvas_width * self.canvas_width + self.canvas_height * self.canvas_height).sqrt()
    }
}
