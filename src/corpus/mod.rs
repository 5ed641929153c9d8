//! Corpus loading and the page entity.
//!
//! A corpus is a fixed, ordered collection of pages built once by the
//! [`loader::CorpusLoader`]: records are parsed into [`page::Page`]
//! entities, placements are sampled on the layout canvas, a random link
//! graph is generated over the id space, and a distance-weighted pruning
//! pass thins the links. The corpus is never mutated structurally after
//! construction; only rank state changes, and only through the rank engine.

pub mod config;
pub mod loader;
pub mod page;
pub mod placement;

pub use config::CorpusConfig;
pub use loader::{Corpus, CorpusLoader};
pub use page::{Page, PageId};
pub use placement::Placement;
