//! CLI command execution: drive the engine, then serve interactive queries.

use std::io::{self, BufRead, Write};

use crate::analysis::token_filter::DEFAULT_STOP_WORDS;
use crate::cli::args::XiphosArgs;
use crate::corpus::config::CorpusConfig;
use crate::error::Result;
use crate::manager::{PageManager, PageManagerConfig};
use crate::rank::RankConfig;

/// Steps between progress lines while iterating.
const PROGRESS_INTERVAL: u64 = 50;

/// Execute the CLI: load the corpus, run the ranking loop, then read
/// queries from stdin until `:quit` or end of input.
pub fn execute(args: XiphosArgs) -> Result<()> {
    let manager = build_manager(&args)?;

    if args.dump_index {
        return dump_index(&manager, args.pretty);
    }

    let mut manager = manager;
    run_ranking(&mut manager, args.iterations)?;
    print_top_pages(&manager, args.top);

    let stdin = io::stdin();
    query_loop(&mut manager, stdin.lock(), &mut io::stdout())
}

fn build_manager(args: &XiphosArgs) -> Result<PageManager> {
    let mut stop_words: Vec<String> =
        DEFAULT_STOP_WORDS.iter().map(|&s| s.to_string()).collect();
    stop_words.extend(args.stop_words.iter().cloned());

    let config = PageManagerConfig::new()
        .with_corpus(CorpusConfig::new().with_seed(args.corpus_seed))
        .with_rank(
            RankConfig::new()
                .with_restart_probability(args.restart_probability)
                .with_seed(args.rank_seed),
        )
        .with_stop_words(stop_words);

    PageManager::from_path(&args.corpus, config)
}

fn dump_index(manager: &PageManager, pretty: bool) -> Result<()> {
    let dump = manager.index().to_sorted_map();
    let json = if pretty {
        serde_json::to_string_pretty(&dump)?
    } else {
        serde_json::to_string(&dump)?
    };
    println!("{json}");
    Ok(())
}

fn run_ranking(manager: &mut PageManager, iterations: u64) -> Result<()> {
    println!(
        "Loaded {} pages; running {} ranking iterations.",
        manager.num_pages(),
        iterations
    );
    let mut remaining = iterations;
    while remaining > 0 {
        if remaining % PROGRESS_INTERVAL == 0 {
            println!("{remaining} iterations to go");
        }
        manager.step()?;
        remaining -= 1;
    }
    println!("Done iterating PageRank.");
    Ok(())
}

fn print_top_pages(manager: &PageManager, top: usize) {
    let mut pages: Vec<_> = manager.pages().iter().collect();
    pages.sort_by(|a, b| b.rank().total_cmp(&a.rank()).then(a.id().cmp(&b.id())));

    println!("\nTop pages by rank:");
    for page in pages.iter().take(top) {
        println!(
            "  {:>4}  {:.4}  {} -> {:?}",
            page.id(),
            page.rank(),
            page.title(),
            page.outbound_links()
        );
    }
}

/// Serve queries from `input`: a bare word runs a word search, a line
/// starting with `?` runs a best-match query, `:quit` (or `:q`) exits.
fn query_loop<R: BufRead, W: Write>(
    manager: &mut PageManager,
    input: R,
    output: &mut W,
) -> Result<()> {
    writeln!(
        output,
        "\nEnter a word to search for, ?<query> for best match, :quit to exit."
    )?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let query = line.trim();

        if query == ":quit" || query == ":q" {
            break;
        } else if let Some(best_match) = query.strip_prefix('?') {
            print_best_match(manager, best_match.trim(), output)?;
        } else if !query.is_empty() {
            print_word_search(manager, query, output)?;
        }

        write!(output, "> ")?;
        output.flush()?;
    }

    Ok(())
}

fn print_word_search<W: Write>(manager: &PageManager, word: &str, output: &mut W) -> Result<()> {
    let results = manager.search_for_word(word)?;
    if results.is_empty() {
        writeln!(output, "Word not found.")?;
        return Ok(());
    }

    writeln!(output, "I found \"{word}\" on the following pages:")?;
    for (page_id, positions) in results {
        // Page ids returned by search always resolve
        if let Some(page) = manager.page(page_id) {
            writeln!(output, "\t\"{}\":{:?}", page.title(), positions)?;
        }
    }
    Ok(())
}

fn print_best_match<W: Write>(manager: &PageManager, query: &str, output: &mut W) -> Result<()> {
    match manager.find_best_match(query)? {
        Some(page_id) => {
            if let Some(page) = manager.page(page_id) {
                writeln!(output, "{}\n\n{}", page.title(), page.body())?;
            }
        }
        None => writeln!(output, "Not Found.")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, body: &str) -> String {
        format!("<title>{title}</title><body>{body}</body>")
    }

    fn scenario_manager() -> PageManager {
        let text = [
            record("Zero", "fish cat"),
            record("One", "fish dog"),
            record("Two", "cat cat"),
        ]
        .join("\n");
        PageManager::from_reader(text.as_bytes(), PageManagerConfig::default()).unwrap()
    }

    #[test]
    fn test_query_loop_word_search() {
        let mut manager = scenario_manager();
        let input = b"fish\n:quit\n" as &[u8];
        let mut output = Vec::new();

        query_loop(&mut manager, input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("I found \"fish\" on the following pages:"));
        assert!(text.contains("\"Zero\":[0]"));
        assert!(text.contains("\"One\":[0]"));
    }

    #[test]
    fn test_query_loop_word_not_found() {
        let mut manager = scenario_manager();
        let input = b"zebra\n" as &[u8];
        let mut output = Vec::new();

        query_loop(&mut manager, input, &mut output).unwrap();

        assert!(String::from_utf8(output).unwrap().contains("Word not found."));
    }

    #[test]
    fn test_query_loop_best_match() {
        let mut manager = scenario_manager();
        let input = b"?fish dog\n?zebra\n:q\n" as &[u8];
        let mut output = Vec::new();

        query_loop(&mut manager, input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("One\n\nfish dog"));
        assert!(text.contains("Not Found."));
    }
}
