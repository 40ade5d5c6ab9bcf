//! Compact text encoding of extracted content.
//!
//! The grammar is line oriented:
//!
//! | Block     | Encoding                                  |
//! |-----------|-------------------------------------------|
//! | heading   | `#` × level, a space, the text            |
//! | paragraph | the text, `\` before a line that reads as a block marker |
//! | image     | `![alt](src)` plus ` *caption*`           |
//! | list      | `- item` or `N. item` per item            |
//! | table     | `\| a \| b \|` rows, `\| --- \|` after headers |
//! | code      | a fenced block, language after the fence  |
//! | quote     | `> ` before every line                    |
//! | video     | `[Video](src)`                            |
//! | embed     | the markup on one line, or `[Embedded content](src)` |
//! | divider   | `---`                                     |
//!
//! Blocks are separated by a blank line and followed by a `Source:` / `Site:`
//! section. The output is byte-identical for identical input.

use crate::blocks::{ContentBlock, EmbedPayload, ExtractedContent};
use crate::render::opens_block;

/// Encodes extracted content into compact text.
///
/// # Example
///
/// ```rust
/// use distill_core::{Distiller, encode};
///
/// let content = Distiller::new().extract("<h1>Hello</h1><p>World</p>", "https://x.example/");
/// assert_eq!(encode(&content), "# Hello\n\nWorld\n\nSource: https://x.example/\nSite: x.example\n");
/// ```
pub fn encode(content: &ExtractedContent) -> String {
    let mut sections: Vec<String> = content.blocks().iter().map(encode_block).collect();

    let mut meta = Vec::new();
    if !content.url().is_empty() {
        meta.push(format!("Source: {}", content.url()));
    }
    if let Some(site) = content.site_name() {
        meta.push(format!("Site: {}", site));
    }
    if !meta.is_empty() {
        sections.push(meta.join("\n"));
    }

    if sections.is_empty() {
        return String::new();
    }

    let mut out = sections.join("\n\n");
    out.push('\n');
    out
}

/// Encodes one block without a trailing newline.
pub fn encode_block(block: &ContentBlock) -> String {
    match block {
        ContentBlock::Heading { level, text } => {
            format!("{} {}", "#".repeat(usize::from((*level).clamp(1, 6))), one_line(text))
        }
        ContentBlock::Paragraph { text } => text.lines().map(escape_marker).collect::<Vec<_>>().join("\n"),
        ContentBlock::Image { src, alt, caption } => match caption {
            Some(caption) => format!("![{}]({}) *{}*", one_line(alt), src, one_line(caption)),
            None => format!("![{}]({})", one_line(alt), src),
        },
        ContentBlock::List { items, ordered } => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if *ordered { format!("{}. {}", i + 1, one_line(item)) } else { format!("- {}", one_line(item)) }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        ContentBlock::Table { headers, rows } => {
            let mut lines = Vec::new();
            if let Some(headers) = headers {
                lines.push(table_row(headers));
                lines.push(table_row(&vec!["---".to_string(); headers.len()]));
            }
            lines.extend(rows.iter().map(|row| table_row(row)));
            lines.join("\n")
        }
        ContentBlock::Code { text, language } => {
            format!("```{}\n{}\n```", language.as_deref().unwrap_or_default(), text)
        }
        ContentBlock::Quote { text } => text.lines().map(|line| format!("> {}", line)).collect::<Vec<_>>().join("\n"),
        ContentBlock::Video { src } => format!("[Video]({})", src),
        ContentBlock::Embed { payload: EmbedPayload::Markup(markup) } => one_line(markup),
        ContentBlock::Embed { payload: EmbedPayload::Source(src) } => format!("[Embedded content]({})", src),
        ContentBlock::Divider => "---".to_string(),
    }
}

fn table_row(cells: &[String]) -> String {
    let cells = cells
        .iter()
        .map(|cell| one_line(cell).replace('|', "\\|"))
        .collect::<Vec<_>>();
    format!("| {} |", cells.join(" | "))
}

/// Keeps prose such as `1. Introduction` or `Source: ...` from decoding as a block.
fn escape_marker(line: &str) -> String {
    let line = line.trim_start();
    if opens_block(line.trim_start_matches('\\')) { format!("\\{}", line) } else { line.to_string() }
}

fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Metadata;
    use pretty_assertions::assert_eq;

    fn content(blocks: Vec<ContentBlock>) -> ExtractedContent {
        let metadata = Metadata { site_name: Some("Example".to_string()), ..Default::default() };
        ExtractedContent::new(metadata, "https://x.example/post", blocks, 200)
    }

    #[test]
    fn test_heading_and_paragraph() {
        let out = encode(&content(vec![
            ContentBlock::Heading { level: 1, text: "Hello".to_string() },
            ContentBlock::Paragraph { text: "World [link text](https://x.example)".to_string() },
        ]));
        assert_eq!(
            out,
            "# Hello\n\nWorld [link text](https://x.example)\n\nSource: https://x.example/post\nSite: Example\n"
        );
    }

    #[test]
    fn test_every_block_kind() {
        let blocks = vec![
            ContentBlock::Heading { level: 3, text: "Section".to_string() },
            ContentBlock::Image {
                src: "https://x.example/a.jpg".to_string(),
                alt: "A".to_string(),
                caption: Some("Cap".to_string()),
            },
            ContentBlock::List { items: vec!["one".to_string(), "two".to_string()], ordered: true },
            ContentBlock::List { items: vec!["dot".to_string()], ordered: false },
            ContentBlock::Table {
                headers: Some(vec!["K".to_string(), "V".to_string()]),
                rows: vec![vec!["a|b".to_string(), "1".to_string()]],
            },
            ContentBlock::Code { text: "let x = 1;".to_string(), language: Some("rust".to_string()) },
            ContentBlock::Quote { text: "first\nsecond".to_string() },
            ContentBlock::Video { src: "https://www.youtube.com/embed/x".to_string() },
            ContentBlock::Embed { payload: EmbedPayload::Source("https://open.spotify.com/embed/t".to_string()) },
            ContentBlock::Divider,
        ];

        let expected = [
            "### Section",
            "![A](https://x.example/a.jpg) *Cap*",
            "1. one\n2. two",
            "- dot",
            "| K | V |\n| --- | --- |\n| a\\|b | 1 |",
            "```rust\nlet x = 1;\n```",
            "> first\n> second",
            "[Video](https://www.youtube.com/embed/x)",
            "[Embedded content](https://open.spotify.com/embed/t)",
            "---",
            "Source: https://x.example/post\nSite: Example",
        ]
        .join("\n\n")
            + "\n";

        assert_eq!(encode(&content(blocks)), expected);
    }

    #[test]
    fn test_headerless_table_has_no_separator() {
        let table = ContentBlock::Table { headers: None, rows: vec![vec!["a".to_string(), "b".to_string()]] };
        assert_eq!(encode_block(&table), "| a | b |");
    }

    #[test]
    fn test_code_without_language() {
        let code = ContentBlock::Code { text: "x".to_string(), language: None };
        assert_eq!(encode_block(&code), "```\nx\n```");
    }

    #[test]
    fn test_paragraph_markers_are_escaped() {
        let cases = [
            ("1. This sentence starts with a number", "\\1. This sentence starts with a number"),
            ("# hashtags are fun", "\\# hashtags are fun"),
            ("Source: the archive", "\\Source: the archive"),
            ("\\- already escaped", "\\\\- already escaped"),
            ("plain\n> not a quote", "plain\n\\> not a quote"),
            ("A normal sentence", "A normal sentence"),
        ];
        for (text, expected) in cases {
            assert_eq!(encode_block(&ContentBlock::Paragraph { text: text.to_string() }), expected);
        }
    }

    #[test]
    fn test_svg_markup_on_one_line() {
        let svg = "<svg width=\"400\" height=\"300\">\n\n  <rect width=\"10\" height=\"10\"></rect>\n</svg>";
        let block = ContentBlock::Embed { payload: EmbedPayload::Markup(svg.to_string()) };
        assert_eq!(
            encode_block(&block),
            "<svg width=\"400\" height=\"300\"> <rect width=\"10\" height=\"10\"></rect> </svg>"
        );
    }

    #[test]
    fn test_deterministic() {
        let blocks = vec![ContentBlock::Paragraph { text: "same".to_string() }];
        assert_eq!(encode(&content(blocks.clone())), encode(&content(blocks)));
    }

    #[test]
    fn test_empty_content() {
        let empty = ExtractedContent::new(Metadata::default(), "", Vec::new(), 200);
        assert_eq!(encode(&empty), "");
    }
}
