//! Extraction pipeline: locate, walk, deduplicate.
//!
//! Every stage is a synchronous transform over an immutable document; nothing
//! is cached between calls, so extractions may run concurrently.

use tracing::{debug, instrument};

use crate::blocks::ExtractedContent;
use crate::dedup::dedupe;
use crate::locate::locate_main_content;
use crate::parse::Document;
use crate::walker::walk;

/// Thresholds used while extracting.
///
/// # Example
///
/// ```rust
/// use distill_core::ExtractConfig;
///
/// let config = ExtractConfig::builder()
///     .min_root_chars(500)
///     .dedupe(false)
///     .build();
/// assert_eq!(config.min_root_chars, 500);
/// assert_eq!(config.min_image_width, 100);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    /// Text a selector match needs before it is accepted as the root (default: 200).
    pub min_root_chars: usize,
    /// Direct text a wrapper needs to count as a paragraph (default: 20).
    pub min_container_chars: usize,
    /// Code blocks must be longer than this (default: 10).
    pub min_code_chars: usize,
    /// Images declaring a smaller width are dropped (default: 100).
    pub min_image_width: u32,
    /// Vector graphics must exceed this in both dimensions (default: 50).
    pub min_embed_dimension: f64,
    /// Reading speed for the reading-time estimate (default: 200).
    pub words_per_minute: u32,
    /// Whether repeated text blocks are removed (default: true).
    pub dedupe: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            min_root_chars: 200,
            min_container_chars: 20,
            min_code_chars: 10,
            min_image_width: 100,
            min_embed_dimension: 50.0,
            words_per_minute: 200,
            dedupe: true,
        }
    }
}

impl ExtractConfig {
    /// Creates a new builder for ExtractConfig.
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder::new()
    }
}

/// Builder for [`ExtractConfig`].
#[derive(Debug, Clone)]
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ExtractConfig::default() }
    }

    pub fn min_root_chars(mut self, value: usize) -> Self {
        self.config.min_root_chars = value;
        self
    }

    pub fn min_container_chars(mut self, value: usize) -> Self {
        self.config.min_container_chars = value;
        self
    }

    pub fn min_code_chars(mut self, value: usize) -> Self {
        self.config.min_code_chars = value;
        self
    }

    pub fn min_image_width(mut self, value: u32) -> Self {
        self.config.min_image_width = value;
        self
    }

    pub fn min_embed_dimension(mut self, value: f64) -> Self {
        self.config.min_embed_dimension = value;
        self
    }

    pub fn words_per_minute(mut self, value: u32) -> Self {
        self.config.words_per_minute = value;
        self
    }

    /// Sets whether repeated text blocks are removed.
    pub fn dedupe(mut self, value: bool) -> Self {
        self.config.dedupe = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ExtractConfig {
        self.config
    }
}

impl Default for ExtractConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the pipeline over a parsed document.
///
/// `url` is recorded as the source URL of the result. Relative links are
/// resolved against the document's own base URL.
#[instrument(skip(doc, config))]
pub fn extract_document(doc: &Document, url: &str, config: &ExtractConfig) -> ExtractedContent {
    let metadata = doc.extract_metadata();

    let root = locate_main_content(doc, config.min_root_chars);
    debug!(strategy = ?root.strategy, tag = root.element.value().name(), "located main content");

    let mut blocks = walk(root.element, doc.base_url(), config);
    debug!(count = blocks.len(), "walked content blocks");

    if config.dedupe {
        let before = blocks.len();
        blocks = dedupe(blocks);
        debug!(dropped = before - blocks.len(), "removed repeated blocks");
    }

    ExtractedContent::new(metadata, url, blocks, config.words_per_minute)
}

/// Parses `html` and extracts its content with the given config.
///
/// An absolute `url` becomes the base for relative links; anything else (an
/// empty string, a file path) is only recorded as the source.
pub fn extract_with_config(html: &str, url: &str, config: &ExtractConfig) -> ExtractedContent {
    let doc = match Document::parse_with_url(html, url) {
        Ok(doc) => doc,
        Err(_) => {
            debug!(url, "no usable base url");
            Document::from_html(html)
        }
    };
    extract_document(&doc, url, config)
}

/// Parses `html` and extracts its content with the default config.
///
/// # Example
///
/// ```rust
/// use distill_core::extract;
///
/// let content = extract("<article><h1>Title</h1><p>Body</p></article>", "https://example.com/a");
/// assert_eq!(content.title(), "Title");
/// assert_eq!(content.blocks().len(), 2);
/// ```
pub fn extract(html: &str, url: &str) -> ExtractedContent {
    extract_with_config(html, url, &ExtractConfig::default())
}
