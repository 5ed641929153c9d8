//! The page entity: immutable content plus rank state.

use crate::error::{Result, XiphosError};

/// Identifier of a page, assigned sequentially from 0 at load time.
pub type PageId = u32;

/// Every page starts with one visit on the books. This acts as a smoothing
/// prior: before any steps are taken, all pages share the rank mass evenly.
const INITIAL_VISIT_COUNT: u64 = 1;

const TITLE_OPEN: &str = "<title>";
const TITLE_CLOSE: &str = "</title>";
const BODY_OPEN: &str = "<body>";
const BODY_CLOSE: &str = "</body>";

/// A single document in the corpus.
///
/// Content (`title`, `body`) and identity (`id`) are immutable after load.
/// `outbound_links` is fixed once the loader's pruning pass completes.
/// `visit_count` and `rank` are mutable rank state, written exclusively by
/// the rank engine (the mutators are crate-private).
#[derive(Debug, Clone)]
pub struct Page {
    id: PageId,
    title: String,
    body: String,
    outbound_links: Vec<PageId>,
    visit_count: u64,
    rank: f64,
}

impl Page {
    /// Parse a raw record into a page.
    ///
    /// A record must contain a `<title>...</title>` section followed by a
    /// `<body>...</body>` section. Missing or out-of-order delimiters fail
    /// with `MalformedContent`.
    pub(crate) fn from_record(id: PageId, raw: &str) -> Result<Self> {
        let (title, body) = parse_sections(id, raw)?;

        Ok(Page {
            id,
            title,
            body,
            outbound_links: Vec::new(),
            visit_count: INITIAL_VISIT_COUNT,
            rank: 0.0,
        })
    }

    /// The page's identifier.
    pub fn id(&self) -> PageId {
        self.id
    }

    /// The text between the title delimiters.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The text between the body delimiters.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Ids of the pages this page links to. Never contains `self.id()`.
    pub fn outbound_links(&self) -> &[PageId] {
        &self.outbound_links
    }

    /// How many times the random surfer has visited this page (including
    /// the initial smoothing visit).
    pub fn visit_count(&self) -> u64 {
        self.visit_count
    }

    /// The page's current rank: its share of all visits so far. In [0, 1].
    pub fn rank(&self) -> f64 {
        self.rank
    }

    pub(crate) fn set_outbound_links(&mut self, links: Vec<PageId>) {
        debug_assert!(!links.contains(&self.id), "self-links are excluded");
        self.outbound_links = links;
    }

    pub(crate) fn record_visit(&mut self) {
        self.visit_count += 1;
    }

    pub(crate) fn recalculate_rank(&mut self, total_visits: u64) {
        self.rank = self.visit_count as f64 / total_visits as f64;
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}->{:?}", self.id, self.title, self.outbound_links)
    }
}

fn parse_sections(id: PageId, raw: &str) -> Result<(String, String)> {
    let title_open = find_tag(id, raw, TITLE_OPEN)?;
    let title_close = find_tag(id, raw, TITLE_CLOSE)?;
    let body_open = find_tag(id, raw, BODY_OPEN)?;
    let body_close = find_tag(id, raw, BODY_CLOSE)?;

    let title_start = title_open + TITLE_OPEN.len();
    let body_start = body_open + BODY_OPEN.len();

    if title_close < title_start || body_open < title_close + TITLE_CLOSE.len() {
        return Err(XiphosError::malformed_content(format!(
            "record {id}: title delimiters out of order"
        )));
    }
    if body_close < body_start {
        return Err(XiphosError::malformed_content(format!(
            "record {id}: body delimiters out of order"
        )));
    }

    let title = raw[title_start..title_close].trim().to_string();
    let body = raw[body_start..body_close].trim().to_string();

    Ok((title, body))
}

fn find_tag(id: PageId, raw: &str, tag: &str) -> Result<usize> {
    raw.find(tag).ok_or_else(|| {
        XiphosError::malformed_content(format!("record {id}: missing {tag} delimiter"))
    })
}
