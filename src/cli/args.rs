//! Command line argument parsing for the xiphos CLI using clap.

use std::path::PathBuf;

use clap::Parser;

/// Xiphos - an in-memory web-page search and ranking engine
#[derive(Parser, Debug, Clone)]
#[command(name = "xiphos")]
#[command(about = "An in-memory web-page search and link-ranking engine")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct XiphosArgs {
    /// Path to the corpus file (one page record per line)
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Number of random-surfer steps to run before serving queries
    #[arg(short, long, default_value_t = 1000)]
    pub iterations: u64,

    /// Seed for link generation, placement, and pruning
    #[arg(long, default_value_t = 42)]
    pub corpus_seed: u64,

    /// Seed for the random surfer
    #[arg(long, default_value_t = 7)]
    pub rank_seed: u64,

    /// Restart (damping) probability for the random surfer
    #[arg(long, default_value_t = 0.15)]
    pub restart_probability: f64,

    /// Extra stop words, excluded from indexing on top of the defaults
    #[arg(long, value_delimiter = ',')]
    pub stop_words: Vec<String>,

    /// How many top-ranked pages to print after iterating
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Print the inverted index as JSON and exit
    #[arg(long)]
    pub dump_index: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}
