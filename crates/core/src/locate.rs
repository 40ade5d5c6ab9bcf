//! Main-content locator.
//!
//! Picks the element the walker starts from. Known CMS containers are tried
//! first, then generic article/main containers, then a cheap text-and-paragraph
//! score over every visible container. The document body is the last resort,
//! so a root is always returned.

use scraper::{ElementRef, Selector};

use crate::parse::Document;
use crate::visibility::is_hidden_within;

/// Content container selectors in priority order
pub const CONTENT_SELECTORS: &[&str] = &[
    r#"[itemprop="articleBody"]"#,
    ".entry-content",
    ".post-content",
    ".article-body",
    ".article__body",
    ".story-body",
    ".td-post-content",
    ".post-body",
    ".markdown-body",
    ".mw-parser-output",
    ".field--name-body",
    "article",
    r#"[role="main"]"#,
    "main",
    "#content",
    ".content",
];

/// Elements considered by the scoring fallback
const SCORED_TAGS: &str = "div, section, article, main";

/// How the root was found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocateStrategy {
    /// Matched one of [`CONTENT_SELECTORS`].
    Selector(&'static str),
    /// Best-scoring container.
    Scored(f64),
    Body,
}

/// The element extraction starts from.
#[derive(Debug, Clone, Copy)]
pub struct LocatedRoot<'a> {
    pub element: ElementRef<'a>,
    pub strategy: LocateStrategy,
}

/// Finds the element holding the page's main content.
///
/// A selector match is accepted only when its trimmed text is longer than
/// `min_chars`. The scoring fallback uses
/// `0.1 * text length + 100 * paragraph count`.
///
/// # Example
///
/// ```rust
/// use distill_core::{Document, LocateStrategy, locate_main_content};
///
/// let body = "word ".repeat(60);
/// let html = format!(r#"<nav>Menu</nav><div class="entry-content"><p>{body}</p></div>"#);
/// let doc = Document::parse(&html).unwrap();
/// let root = locate_main_content(&doc, 200);
/// assert_eq!(root.strategy, LocateStrategy::Selector(".entry-content"));
/// ```
pub fn locate_main_content(doc: &Document, min_chars: usize) -> LocatedRoot<'_> {
    for pattern in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(pattern) else {
            continue;
        };

        let found = doc
            .html()
            .select(&selector)
            .find(|el| text_length(*el) > min_chars && !is_hidden_within(*el));
        if let Some(element) = found {
            return LocatedRoot { element, strategy: LocateStrategy::Selector(pattern) };
        }
    }

    if let Some((element, score)) = best_scored(doc) {
        return LocatedRoot { element, strategy: LocateStrategy::Scored(score) };
    }

    LocatedRoot { element: doc.body(), strategy: LocateStrategy::Body }
}

fn best_scored(doc: &Document) -> Option<(ElementRef<'_>, f64)> {
    let containers = Selector::parse(SCORED_TAGS).ok()?;
    let paragraphs = Selector::parse("p").ok()?;

    let mut best: Option<(ElementRef<'_>, f64)> = None;
    for el in doc.html().select(&containers) {
        if is_hidden_within(el) {
            continue;
        }

        let score = 0.1 * text_length(el) as f64 + 100.0 * el.select(&paragraphs).count() as f64;
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((el, score));
        }
    }

    best.filter(|(_, score)| *score > 0.0)
}

fn text_length(el: ElementRef<'_>) -> usize {
    el.text().collect::<String>().trim().chars().count()
}
