//! 2-D placement of pages on the layout canvas.
//!
//! Placements are consumed by the loader's pruning pass (link removal is
//! weighted by spatial distance) and exposed read-only for the rendering
//! layer. The core does no drawing itself.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::corpus::config::CorpusConfig;

/// How many candidate positions to try per page before giving up on the
/// minimum-distance constraint. Keeps a crowded canvas from hanging the load.
const MAX_PLACEMENT_ATTEMPTS: usize = 200;

/// A page's position on the layout canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Horizontal position of the page's center.
    pub x: f64,
    /// Vertical position of the page's center.
    pub y: f64,
}

impl Placement {
    /// Euclidean distance to another placement.
    pub fn distance_to(&self, other: &Placement) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Sample one placement per page, keeping each at least
/// `config.min_placement_distance()` away from all previous ones where
/// possible. After `MAX_PLACEMENT_ATTEMPTS` rejected candidates the last
/// candidate is accepted anyway.
pub(crate) fn sample_placements(
    count: usize,
    config: &CorpusConfig,
    rng: &mut StdRng,
) -> Vec<Placement> {
    let margin = 2.0 + config.box_half_size;
    let x_range = margin..=(config.canvas_width - margin).max(margin);
    let y_range = margin..=(config.canvas_height - margin).max(margin);
    let min_distance = config.min_placement_distance();

    let mut placements: Vec<Placement> = Vec::with_capacity(count);
    for _ in 0..count {
        let mut candidate = Placement {
            x: rng.random_range(x_range.clone()),
            y: rng.random_range(y_range.clone()),
        };
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            if placements
                .iter()
                .all(|p| p.distance_to(&candidate) >= min_distance)
            {
                break;
            }
            candidate = Placement {
                x: rng.random_range(x_range.clone()),
                y: rng.random_range(y_range.clone()),
            };
        }
        placements.push(candidate);
    }

    placements
}
