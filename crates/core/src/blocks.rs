//! Content block model.
//!
//! A page is reduced to an ordered list of [`ContentBlock`]s. Text-bearing
//! variants hold inline-serialized text (whitelisted tag pairs and
//! `[text](href)` links); media variants hold structured fields.

use serde::{Deserialize, Serialize};

use crate::metadata::Metadata;

/// Payload of an embed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum EmbedPayload {
    /// Sanitized inline markup (vector graphics).
    Markup(String),
    /// Source URL of an allow-listed embed.
    Source(String),
}

/// One classified unit of page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
    },
    Image {
        src: String,
        alt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    List {
        items: Vec<String>,
        ordered: bool,
    },
    Table {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        headers: Option<Vec<String>>,
        rows: Vec<Vec<String>>,
    },
    Code {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    Quote {
        text: String,
    },
    Video {
        src: String,
    },
    Embed {
        payload: EmbedPayload,
    },
    Divider,
}

impl ContentBlock {
    /// Short lowercase name of the variant, as used in the JSON `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Heading { .. } => "heading",
            ContentBlock::Paragraph { .. } => "paragraph",
            ContentBlock::Image { .. } => "image",
            ContentBlock::List { .. } => "list",
            ContentBlock::Table { .. } => "table",
            ContentBlock::Code { .. } => "code",
            ContentBlock::Quote { .. } => "quote",
            ContentBlock::Video { .. } => "video",
            ContentBlock::Embed { .. } => "embed",
            ContentBlock::Divider => "divider",
        }
    }

    /// Media and structural blocks never take part in deduplication.
    pub fn is_media(&self) -> bool {
        matches!(
            self,
            ContentBlock::Image { .. } | ContentBlock::Video { .. } | ContentBlock::Embed { .. } | ContentBlock::Divider
        )
    }

    /// The text this block contributes, or `None` for media blocks.
    ///
    /// Lists and tables join their items/cells with newlines.
    pub fn text(&self) -> Option<String> {
        match self {
            ContentBlock::Heading { text, .. }
            | ContentBlock::Paragraph { text }
            | ContentBlock::Code { text, .. }
            | ContentBlock::Quote { text } => Some(text.clone()),
            ContentBlock::List { items, .. } => Some(items.join("\n")),
            ContentBlock::Table { headers, rows } => {
                let cells = headers
                    .iter()
                    .flatten()
                    .chain(rows.iter().flatten())
                    .map(String::as_str)
                    .collect::<Vec<_>>();
                Some(cells.join("\n"))
            }
            _ => None,
        }
    }

    /// Words counted toward the reading-time estimate (headings and paragraphs only).
    pub fn reading_words(&self) -> usize {
        match self {
            ContentBlock::Heading { text, .. } | ContentBlock::Paragraph { text } => text.split_whitespace().count(),
            _ => 0,
        }
    }
}

/// The immutable result of one extraction.
///
/// Fields are read through accessors; a value is built once by
/// [`ExtractedContent::new`] and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedContent {
    title: String,
    description: Option<String>,
    author: Option<String>,
    published: Option<String>,
    url: String,
    site_name: Option<String>,
    blocks: Vec<ContentBlock>,
    word_count: usize,
    reading_time: f64,
}

impl ExtractedContent {
    /// Builds the aggregate and computes the reading-time estimate.
    pub fn new(metadata: Metadata, url: impl Into<String>, blocks: Vec<ContentBlock>, words_per_minute: u32) -> Self {
        let word_count = blocks.iter().map(ContentBlock::reading_words).sum::<usize>();
        let reading_time = if words_per_minute == 0 { 0.0 } else { word_count as f64 / f64::from(words_per_minute) };

        Self {
            title: metadata.title.unwrap_or_default(),
            description: metadata.description,
            author: metadata.author,
            published: metadata.date,
            url: url.into(),
            site_name: metadata.site_name,
            blocks,
            word_count,
            reading_time,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn published(&self) -> Option<&str> {
        self.published.as_deref()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn site_name(&self) -> Option<&str> {
        self.site_name.as_deref()
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    /// Words in heading and paragraph blocks.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Estimated reading time in minutes.
    pub fn reading_time(&self) -> f64 {
        self.reading_time
    }

    /// `true` when extraction produced zero blocks, which callers report as a failure.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> ContentBlock {
        ContentBlock::Paragraph { text: text.to_string() }
    }

    #[test]
    fn test_reading_time_counts_headings_and_paragraphs() {
        let words = "word ".repeat(150);
        let blocks = vec![
            ContentBlock::Heading { level: 2, text: "two words".to_string() },
            paragraph(&words),
            ContentBlock::Code { text: "not counted at all".to_string(), language: None },
            ContentBlock::List { items: vec!["also not counted".to_string()], ordered: false },
        ];

        let content = ExtractedContent::new(Metadata::default(), "https://example.com", blocks, 200);
        assert_eq!(content.word_count(), 152);
        assert!((content.reading_time() - 0.76).abs() < 1e-9);
    }

    #[test]
    fn test_metadata_is_carried() {
        let metadata = Metadata {
            title: Some("Title".to_string()),
            author: Some("Author".to_string()),
            date: Some("2024-01-01".to_string()),
            description: Some("Desc".to_string()),
            site_name: Some("Site".to_string()),
        };
        let content = ExtractedContent::new(metadata, "https://example.com/a", vec![paragraph("x")], 200);

        assert_eq!(content.title(), "Title");
        assert_eq!(content.author(), Some("Author"));
        assert_eq!(content.published(), Some("2024-01-01"));
        assert_eq!(content.description(), Some("Desc"));
        assert_eq!(content.site_name(), Some("Site"));
        assert_eq!(content.url(), "https://example.com/a");
        assert!(!content.is_empty());
    }

    #[test]
    fn test_block_text() {
        let table = ContentBlock::Table {
            headers: Some(vec!["A".to_string()]),
            rows: vec![vec!["1".to_string()], vec!["2".to_string()]],
        };
        assert_eq!(table.text(), Some("A\n1\n2".to_string()));
        assert_eq!(ContentBlock::Divider.text(), None);
        assert!(ContentBlock::Video { src: "https://x".to_string() }.is_media());
        assert!(!paragraph("x").is_media());
    }

    #[test]
    fn test_block_serialization() {
        let json = serde_json::to_value(ContentBlock::Heading { level: 2, text: "Hi".to_string() }).unwrap();
        assert_eq!(json["type"], "heading");
        assert_eq!(json["level"], 2);

        let embed = ContentBlock::Embed { payload: EmbedPayload::Source("https://x.example".to_string()) };
        let json = serde_json::to_value(&embed).unwrap();
        assert_eq!(json["payload"]["kind"], "source");
        assert_eq!(serde_json::from_value::<ContentBlock>(json).unwrap(), embed);

        let divider = serde_json::to_string(&ContentBlock::Divider).unwrap();
        assert_eq!(divider, r#"{"type":"divider"}"#);
    }
}
