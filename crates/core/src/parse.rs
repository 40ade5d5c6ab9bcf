//! HTML parsing and DOM access.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! HTML and navigating the DOM tree using CSS selectors. The underlying tree
//! is `scraper`'s arena (`ego_tree`), so nodes are addressed by a copyable
//! `NodeId` and parent/child links never form ownership cycles.
//!
//! # Example
//!
//! ```rust
//! use distill_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <p class="content">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let paragraphs = doc.select("p.content").unwrap();
//! assert_eq!(paragraphs.len(), 1);
//! ```

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::{DistillError, Result};

/// Represents a parsed HTML document.
///
/// A Document wraps an HTML page and provides methods for querying elements
/// using CSS selectors and extracting metadata. It optionally carries the
/// page URL, used to absolutize links and image sources.
///
/// # Example
///
/// ```rust
/// use distill_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.title(), Some("Test".to_string()));
/// ```
pub struct Document {
    html: Html,
    base_url: Option<Url>,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// html5ever recovers from any malformed input, so this only fails in
    /// theory; the `Result` keeps the signature uniform with [`Document::parse_with_url`].
    pub fn parse(html: &str) -> Result<Self> {
        Ok(Self::from_html(html))
    }

    /// Parses HTML without a base URL.
    pub fn from_html(html: &str) -> Self {
        Self { html: Html::parse_document(html), base_url: None }
    }

    /// Parses HTML and records the page URL as the base for relative links.
    ///
    /// # Errors
    ///
    /// Returns [`DistillError::InvalidUrl`] if `url` is not an absolute URL.
    ///
    /// # Example
    ///
    /// ```rust
    /// use distill_core::parse::Document;
    ///
    /// let doc = Document::parse_with_url("<p>Hi</p>", "https://example.com/post").unwrap();
    /// assert_eq!(doc.base_url().unwrap().host_str(), Some("example.com"));
    /// ```
    pub fn parse_with_url(html: &str, url: &str) -> Result<Self> {
        let base_url = Url::parse(url).map_err(|e| DistillError::InvalidUrl(e.to_string()))?;
        let html = Html::parse_document(html);
        Ok(Self { html, base_url: Some(base_url) })
    }

    /// Gets the base URL recorded at parse time.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Gets the raw HTML representation.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Gets the `<body>` element, or the root element when there is none.
    ///
    /// Never fails: the locator relies on this as its last resort.
    pub fn body(&self) -> ElementRef<'_> {
        Selector::parse("body")
            .ok()
            .and_then(|sel| self.html.select(&sel).next())
            .unwrap_or_else(|| self.html.root_element())
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`DistillError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use distill_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html).unwrap();
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| DistillError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Gets the content of the `<title>` element if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

/// A wrapper around scraper's ElementRef for metadata lookups.
///
/// # Example
///
/// ```rust
/// use distill_core::parse::Document;
///
/// let html = r#"<a href="https://example.com">Link text</a>"#;
/// let doc = Document::parse(html).unwrap();
/// let link = &doc.select("a").unwrap()[0];
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://example.com"));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the underlying scraper element.
    pub fn as_ref(&self) -> ElementRef<'a> {
        self.element
    }

    /// Gets the text content of this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <title>Test Page</title>
        </head>
        <body>
            <h1>Heading</h1>
            <p class="content">Paragraph 1</p>
            <p class="content">Paragraph 2</p>
            <a href="https://example.com">Link</a>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_document() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        assert_eq!(doc.title(), Some("Test Page".to_string()));
        assert!(doc.base_url().is_none());
    }

    #[test]
    fn test_parse_with_url() {
        let doc = Document::parse_with_url(SAMPLE_HTML, "https://example.com/blog/post").unwrap();
        assert_eq!(doc.base_url().map(|u| u.as_str()), Some("https://example.com/blog/post"));
    }

    #[test]
    fn test_parse_with_invalid_url() {
        let result = Document::parse_with_url(SAMPLE_HTML, "not a url");
        assert!(matches!(result, Err(DistillError::InvalidUrl(_))));
    }

    #[test]
    fn test_select_elements() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let elements = doc.select("p.content").unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].text(), "Paragraph 1");
        assert_eq!(elements[1].text(), "Paragraph 2");
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let result = doc.select("[[invalid");

        assert!(matches!(result, Err(DistillError::HtmlParseError(_))));
    }

    #[test]
    fn test_body_lookup() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let body = doc.body();
        assert_eq!(body.value().name(), "body");
    }

    #[test]
    fn test_empty_title_is_none() {
        let doc = Document::parse("<html><head><title>  </title></head></html>").unwrap();
        assert_eq!(doc.title(), None);
    }
}
