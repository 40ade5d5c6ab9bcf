//! The `Distiller` entry point and one-line convenience functions.
//!
//! ```rust
//! use distill_core::Distiller;
//!
//! let distiller = Distiller::new();
//! let html = "<html><body><article><h2>Intro</h2><p>Some <b>bold</b> text.</p></article></body></html>";
//!
//! let text = distiller.distill(html, "https://example.com/post").unwrap();
//! assert!(text.starts_with("## Intro\n\nSome <strong>bold</strong> text.\n"));
//!
//! let markup = distiller.render(html, "https://example.com/post").unwrap();
//! assert!(markup.contains("<h3>Intro</h3>"));
//! ```

#[cfg(feature = "fetch")]
use tracing::debug;

use crate::blocks::ExtractedContent;
use crate::encode::encode;
use crate::extract::{ExtractConfig, extract_with_config};
#[cfg(feature = "fetch")]
use crate::fetch::{FetchConfig, fetch_url};
use crate::render::render_html;
use crate::{DistillError, Result};

/// Turns HTML pages into blocks, compact text, or rendered markup.
///
/// Holds only configuration, so one instance can serve any number of
/// concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct Distiller {
    config: ExtractConfig,
}

impl Distiller {
    /// Creates a distiller with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a distiller with a custom configuration.
    ///
    /// ```rust
    /// use distill_core::{Distiller, ExtractConfig};
    ///
    /// let config = ExtractConfig::builder().dedupe(false).build();
    /// let distiller = Distiller::with_config(config);
    /// assert!(!distiller.config().dedupe);
    /// ```
    pub fn with_config(config: ExtractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Extracts content blocks and metadata. Never fails; an empty result is
    /// signalled by [`ExtractedContent::is_empty`].
    pub fn extract(&self, html: &str, url: &str) -> ExtractedContent {
        extract_with_config(html, url, &self.config)
    }

    /// Extracts and encodes the page as compact text.
    ///
    /// # Errors
    ///
    /// Returns [`DistillError::NoContent`] when no block was extracted.
    pub fn distill(&self, html: &str, url: &str) -> Result<String> {
        let content = self.extract(html, url);
        if content.is_empty() {
            return Err(DistillError::NoContent);
        }
        Ok(encode(&content))
    }

    /// Extracts, encodes and renders the page to HTML without any model call.
    ///
    /// The page title is passed to the renderer so a heading repeating it is
    /// left to the caller's template.
    ///
    /// # Errors
    ///
    /// Returns [`DistillError::NoContent`] when no block was extracted.
    pub fn render(&self, html: &str, url: &str) -> Result<String> {
        let content = self.extract(html, url);
        if content.is_empty() {
            return Err(DistillError::NoContent);
        }

        let text = encode(&content);
        let title = Some(content.title()).filter(|t| !t.is_empty());
        Ok(render_html(&text, title))
    }

    /// Fetches `url` and encodes the page as compact text.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use distill_core::{Distiller, FetchConfig};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let text = Distiller::new()
    ///         .fetch_and_distill("https://example.com/article", &FetchConfig::default())
    ///         .await?;
    ///     println!("{text}");
    ///     Ok(())
    /// }
    /// ```
    #[cfg(feature = "fetch")]
    pub async fn fetch_and_distill(&self, url: &str, fetch_config: &FetchConfig) -> Result<String> {
        let html = fetch_url(url, fetch_config).await?;
        debug!(bytes = html.len(), url, "fetched page");
        self.distill(&html, url)
    }
}

/// Encodes a page as compact text with default settings.
///
/// # Errors
///
/// Returns [`DistillError::NoContent`] when no block was extracted.
pub fn distill(html: &str, url: &str) -> Result<String> {
    Distiller::new().distill(html, url)
}

/// Renders a page to HTML through compact text with default settings.
///
/// # Errors
///
/// Returns [`DistillError::NoContent`] when no block was extracted.
pub fn render(html: &str, url: &str) -> Result<String> {
    Distiller::new().render(html, url)
}
