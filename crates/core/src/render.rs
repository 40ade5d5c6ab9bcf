//! Deterministic decoder: compact or flat text back into safe HTML.
//!
//! One forward scan over the lines. A single block (paragraph, list, quote or
//! table) is open at a time and is flushed by a blank line or by the start of
//! any other block; fenced code is collected separately until its closing fence.
//!
//! Both text dialects go through [`render_html`]: the encoder's grammar and the
//! flat dialect (`# Title`, `[Image: alt](url)`, `Author:`/`Source:`/`URL:` lines).
//! Unrecognized lines never fail; they become paragraph text.
//!
//! Inline text is always HTML-escaped first. Only afterwards are balanced pairs of
//! escaped whitelisted tags turned back into live tags, so a literal `<` in the
//! input can never take part in building markup.
//!
//! A line starting with `\` followed by a block marker is paragraph text with the
//! backslash removed. A single line holding an `<svg>` element is re-sanitized and
//! emitted as markup.

use std::sync::LazyLock;

use htmlescape::encode_minimal;
use regex::{Captures, Regex};

use crate::inline::canonical_tag;
use crate::sanitize::sanitize_svg;

/// Line prefixes of metadata already shown by the page template
pub const METADATA_PREFIXES: &[&str] = &["Author:", "Source:", "URL:", "Site:"];

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());

static FLAT_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[Image:\s*([^\]]*)\]\((https?://(?:[^\s()]|\([^\s()]*\))+)\)$").unwrap());

static BLOCK_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^!\[([^\]]*)\]\((https?://(?:[^\s()]|\([^\s()]*\))+)\)(?:\s+\*(.+)\*)?$").unwrap()
});

static UNORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*+]\s+(.+)$").unwrap());

static ORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+[.)]\s+(.+)$").unwrap());

static SEPARATOR_CELL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^:?-{3,}:?$").unwrap());

/// Hrefs may hold one level of balanced parentheses, as in `Rust_(programming_language)`.
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]+)\]\(((?:[^()\s]|\([^()\s]*\))+)\)").unwrap());

static LINK_SLOT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\x{E000}(\d+)\x{E001}").unwrap());

static ESCAPED_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&lt;(/?)([a-zA-Z]+)&gt;").unwrap());

/// Renders compact or flat text as an HTML fragment.
///
/// Headings are demoted one level (`#` becomes `<h2>`, clamped at `<h6>`); a
/// heading equal to `title` is dropped because the page template shows it.
///
/// # Example
///
/// ```rust
/// use distill_core::render_html;
///
/// let html = render_html("# Hello\n\nWorld [link](https://x.example)", None);
/// assert_eq!(
///     html,
///     "<h2>Hello</h2>\n<p>World <a href=\"https://x.example\" target=\"_blank\" rel=\"noopener noreferrer\">link</a></p>"
/// );
/// ```
pub fn render_html(text: &str, title: Option<&str>) -> String {
    let mut renderer = Renderer { title: title.map(str::trim), out: Vec::new(), open: None, fence: None };
    for line in text.lines() {
        renderer.line(line);
    }
    renderer.finish()
}

enum Open {
    Paragraph(Vec<String>),
    List { ordered: bool, items: Vec<String> },
    Quote(Vec<String>),
    Table(Vec<String>),
}

struct Fence {
    language: Option<String>,
    lines: Vec<String>,
}

struct Renderer<'t> {
    title: Option<&'t str>,
    out: Vec<String>,
    open: Option<Open>,
    fence: Option<Fence>,
}

impl Renderer<'_> {
    fn line(&mut self, line: &str) {
        if self.fence.is_some() {
            if line.trim_start().starts_with("```") {
                self.close_fence();
            } else if let Some(fence) = self.fence.as_mut() {
                fence.lines.push(line.to_string());
            }
            return;
        }

        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix('\\')
            && opens_block(rest.trim_start_matches('\\'))
        {
            self.push_paragraph(rest);
        } else if let Some(info) = trimmed.strip_prefix("```") {
            self.flush();
            self.fence = Some(Fence { language: fence_language(info), lines: Vec::new() });
        } else if trimmed.is_empty() {
            self.flush();
        } else if let Some(caps) = HEADING.captures(trimmed) {
            self.flush();
            let text = caps[2].trim();
            if self.title.is_some_and(|title| title.eq_ignore_ascii_case(text)) {
                return;
            }
            let level = (caps[1].len() + 1).min(6);
            self.out.push(format!("<h{level}>{}</h{level}>", render_inline(text)));
        } else if METADATA_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix)) {
            self.flush();
        } else if is_svg_line(trimmed) {
            self.flush();
            if let Some(markup) = sanitize_svg(trimmed) {
                self.out.push(markup);
            }
        } else if let Some(caps) = FLAT_IMAGE.captures(trimmed) {
            self.flush();
            let alt = caps[1].trim();
            self.out.push(figure(&caps[2], alt, Some(alt)));
        } else if let Some(caps) = BLOCK_IMAGE.captures(trimmed) {
            self.flush();
            let caption = caps.get(3).map(|m| m.as_str().trim());
            self.out.push(figure(&caps[2], caps[1].trim(), caption));
        } else if matches!(trimmed, "---" | "***" | "___") {
            self.flush();
            self.out.push("<hr>".to_string());
        } else if let Some(caps) = UNORDERED_ITEM.captures(trimmed) {
            self.push_item(false, &caps[1]);
        } else if let Some(caps) = ORDERED_ITEM.captures(trimmed) {
            self.push_item(true, &caps[1]);
        } else if let Some(rest) = trimmed.strip_prefix('>') {
            self.push_quote(rest.trim());
        } else if is_table_row(trimmed) {
            self.push_row(trimmed);
        } else {
            self.push_paragraph(trimmed);
        }
    }

    fn push_paragraph(&mut self, line: &str) {
        if let Some(Open::Paragraph(lines)) = &mut self.open {
            lines.push(line.to_string());
            return;
        }
        self.flush();
        self.open = Some(Open::Paragraph(vec![line.to_string()]));
    }

    fn push_item(&mut self, ordered: bool, item: &str) {
        if let Some(Open::List { ordered: open_ordered, items }) = &mut self.open
            && *open_ordered == ordered
        {
            items.push(item.to_string());
            return;
        }
        self.flush();
        self.open = Some(Open::List { ordered, items: vec![item.to_string()] });
    }

    fn push_quote(&mut self, line: &str) {
        if let Some(Open::Quote(lines)) = &mut self.open {
            lines.push(line.to_string());
            return;
        }
        self.flush();
        self.open = Some(Open::Quote(vec![line.to_string()]));
    }

    fn push_row(&mut self, line: &str) {
        if let Some(Open::Table(rows)) = &mut self.open {
            rows.push(line.to_string());
            return;
        }
        self.flush();
        self.open = Some(Open::Table(vec![line.to_string()]));
    }

    fn flush(&mut self) {
        let Some(open) = self.open.take() else {
            return;
        };

        let html = match open {
            Open::Paragraph(lines) => format!("<p>{}</p>", render_inline(&lines.join(" "))),
            Open::List { ordered, items } => {
                let tag = if ordered { "ol" } else { "ul" };
                let items: String = items.iter().map(|item| format!("<li>{}</li>", render_inline(item))).collect();
                format!("<{tag}>{items}</{tag}>")
            }
            Open::Quote(lines) => {
                let paragraphs: String = lines
                    .iter()
                    .filter(|line| !line.is_empty())
                    .map(|line| format!("<p>{}</p>", render_inline(line)))
                    .collect();
                if paragraphs.is_empty() {
                    return;
                }
                format!("<blockquote>{paragraphs}</blockquote>")
            }
            Open::Table(rows) => table(&rows),
        };
        self.out.push(html);
    }

    fn close_fence(&mut self) {
        let Some(Fence { language, mut lines }) = self.fence.take() else {
            return;
        };

        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }

        let class = language.map(|lang| format!(" class=\"language-{lang}\"")).unwrap_or_default();
        self.out.push(format!("<pre><code{class}>{}</code></pre>", encode_minimal(&lines.join("\n"))));
    }

    fn finish(mut self) -> String {
        self.flush();
        self.close_fence();
        self.out.join("\n")
    }
}

/// Returns `true` when `line` would open something other than a paragraph.
///
/// The encoder prefixes such paragraph lines with `\` so they decode as text.
///
/// ```rust
/// use distill_core::render::opens_block;
///
/// assert!(opens_block("1. Not really a list"));
/// assert!(opens_block("Source: a quote"));
/// assert!(!opens_block("Plain prose"));
/// ```
pub fn opens_block(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with("```")
        || trimmed.starts_with('>')
        || matches!(trimmed, "---" | "***" | "___")
        || HEADING.is_match(trimmed)
        || METADATA_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix))
        || is_svg_line(trimmed)
        || FLAT_IMAGE.is_match(trimmed)
        || BLOCK_IMAGE.is_match(trimmed)
        || UNORDERED_ITEM.is_match(trimmed)
        || ORDERED_ITEM.is_match(trimmed)
        || is_table_row(trimmed)
}

fn is_svg_line(line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    lower.starts_with("<svg") && lower.ends_with("</svg>")
}

fn is_table_row(line: &str) -> bool {
    line.len() > 1 && line.starts_with('|') && line.ends_with('|')
}

fn fence_language(info: &str) -> Option<String> {
    let info = info.trim();
    let valid = !info.is_empty()
        && info
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '#' | '-' | '_' | '.'));
    valid.then(|| info.to_string())
}

fn figure(src: &str, alt: &str, caption: Option<&str>) -> String {
    let caption = caption
        .filter(|c| !c.is_empty())
        .map(|c| format!("<figcaption>{}</figcaption>", render_inline(c)))
        .unwrap_or_default();
    format!(
        "<figure><img src=\"{}\" alt=\"{}\" loading=\"lazy\">{}</figure>",
        encode_minimal(src),
        encode_minimal(alt),
        caption
    )
}

fn table(rows: &[String]) -> String {
    let rows: Vec<Vec<String>> = rows.iter().map(|row| split_cells(row)).collect();
    let is_separator = |row: &[String]| !row.is_empty() && row.iter().all(|cell| SEPARATOR_CELL.is_match(cell));

    let (head, body) = match rows.as_slice() {
        [first, second, rest @ ..] if is_separator(second.as_slice()) => (Some(first), rest),
        all => (None, all),
    };

    let cells = |row: &[String], tag: &str| -> String {
        row.iter().map(|cell| format!("<{tag}>{}</{tag}>", render_inline(cell))).collect()
    };

    let mut html = String::from("<table>");
    if let Some(head) = head {
        html.push_str(&format!("<thead><tr>{}</tr></thead>", cells(head.as_slice(), "th")));
    }
    html.push_str("<tbody>");
    for row in body.iter().filter(|row| !is_separator(row.as_slice())) {
        html.push_str(&format!("<tr>{}</tr>", cells(row.as_slice(), "td")));
    }
    html.push_str("</tbody></table>");
    html
}

/// Splits a pipe row into trimmed cells, honouring `\|` escapes.
fn split_cells(row: &str) -> Vec<String> {
    let row = row.trim();
    let row = row.strip_prefix('|').unwrap_or(row);
    let row = match row.strip_suffix('|') {
        Some(inner) if !inner.ends_with('\\') => inner,
        _ => row,
    };

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = row.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());
    cells
}

/// Renders one line of inline text: links, escaping, then whitelisted tags.
///
/// ```rust
/// use distill_core::render::render_inline;
///
/// assert_eq!(render_inline("<b>bold</b> & <script>x</script>"), "<strong>bold</strong> &amp; &lt;script&gt;x&lt;/script&gt;");
/// ```
pub fn render_inline(text: &str) -> String {
    let text: String = text.chars().filter(|c| !matches!(*c, '\u{E000}' | '\u{E001}')).collect();

    // Safe links are parked in numbered slots so tag pairs can wrap them.
    let mut anchors = Vec::new();
    let slotted = LINK.replace_all(&text, |caps: &Captures<'_>| {
        let href = &caps[2];
        if !is_safe_href(href) {
            return caps[0].to_string();
        }
        anchors.push(format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            encode_minimal(href),
            safe_text(&caps[1])
        ));
        format!("\u{E000}{}\u{E001}", anchors.len() - 1)
    });

    let escaped = safe_text(&slotted);
    LINK_SLOT
        .replace_all(&escaped, |caps: &Captures<'_>| {
            caps[1].parse::<usize>().ok().and_then(|i| anchors.get(i)).cloned().unwrap_or_default()
        })
        .into_owned()
}

fn is_safe_href(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    ["http://", "https://", "mailto:"].iter().any(|scheme| lower.starts_with(scheme))
        || href.starts_with('/')
        || href.starts_with('#')
}

fn safe_text(text: &str) -> String {
    unescape_inline_tags(&encode_minimal(text))
}

/// Turns balanced, properly nested pairs of escaped whitelisted tags back into
/// canonical tags. Unbalanced or crossing tags stay escaped.
fn unescape_inline_tags(escaped: &str) -> String {
    struct Token {
        start: usize,
        end: usize,
        closing: bool,
        tag: &'static str,
    }

    let tokens: Vec<Token> = ESCAPED_TAG
        .captures_iter(escaped)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let tag = canonical_tag(&caps[2])?;
            Some(Token { start: whole.start(), end: whole.end(), closing: !caps[1].is_empty(), tag })
        })
        .collect();

    let mut paired = vec![false; tokens.len()];
    let mut stack: Vec<usize> = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        if !token.closing {
            stack.push(i);
        } else if let Some(&top) = stack.last()
            && tokens[top].tag == token.tag
        {
            stack.pop();
            paired[top] = true;
            paired[i] = true;
        }
    }

    let mut out = String::with_capacity(escaped.len());
    let mut last = 0;
    for (token, paired) in tokens.iter().zip(paired) {
        out.push_str(&escaped[last..token.start]);
        if paired {
            out.push_str(if token.closing { "</" } else { "<" });
            out.push_str(token.tag);
            out.push('>');
        } else {
            out.push_str(&escaped[token.start..token.end]);
        }
        last = token.end;
    }
    out.push_str(&escaped[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_heading_and_paragraph_with_link() {
        let html = render_html("# Hello\n\nWorld [link text](https://x.example)", None);
        assert_eq!(
            html,
            "<h2>Hello</h2>\n<p>World <a href=\"https://x.example\" target=\"_blank\" rel=\"noopener noreferrer\">link text</a></p>"
        );
    }

    #[test]
    fn test_title_heading_is_dropped() {
        assert_eq!(render_html("# My Title\nBody", Some("My Title")), "<p>Body</p>");
        assert_eq!(render_html("## Other\n", Some("My Title")), "<h3>Other</h3>");
    }

    #[rstest]
    #[case("# a", "<h2>a</h2>")]
    #[case("##### a", "<h6>a</h6>")]
    #[case("###### a", "<h6>a</h6>")]
    #[case("####### a", "<p>####### a</p>")]
    #[case("#no-space", "<p>#no-space</p>")]
    fn test_heading_levels(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(render_html(input, None), expected);
    }

    #[test]
    fn test_code_fence() {
        assert_eq!(render_html("```\ncode line\n```", None), "<pre><code>code line</code></pre>");
    }

    #[test]
    fn test_code_fence_escapes_and_trims() {
        let html = render_html("```rust\nlet a = 1 < 2;\n\n\n```", None);
        assert_eq!(html, "<pre><code class=\"language-rust\">let a = 1 &lt; 2;</code></pre>");
    }

    #[test]
    fn test_unterminated_fence_is_flushed() {
        assert_eq!(render_html("text\n```\nfn x()", None), "<p>text</p>\n<pre><code>fn x()</code></pre>");
    }

    #[test]
    fn test_flat_image() {
        let html = render_html("[Image: A cat](https://x.example/cat.jpg)", None);
        assert_eq!(
            html,
            "<figure><img src=\"https://x.example/cat.jpg\" alt=\"A cat\" loading=\"lazy\"><figcaption>A cat</figcaption></figure>"
        );
    }

    #[test]
    fn test_image_requires_http() {
        let html = render_html("[Image: x](javascript:alert(1))", None);
        assert!(html.starts_with("<p>"));
        assert!(!html.contains("<a "));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_block_image_with_caption() {
        let html = render_html("![Alt](https://x.example/a.jpg) *The caption*", None);
        assert_eq!(
            html,
            "<figure><img src=\"https://x.example/a.jpg\" alt=\"Alt\" loading=\"lazy\"><figcaption>The caption</figcaption></figure>"
        );
    }

    #[test]
    fn test_metadata_lines_are_dropped() {
        let html = render_html("Intro line\nAuthor: Jane\nSource: https://x.example\nURL: https://x.example\nSite: X", None);
        assert_eq!(html, "<p>Intro line</p>");
    }

    #[test]
    fn test_paragraph_lines_join_with_spaces() {
        assert_eq!(render_html("one\ntwo\n\nthree", None), "<p>one two</p>\n<p>three</p>");
    }

    #[test]
    fn test_lists_quotes_and_dividers() {
        let html = render_html("- a\n- b\n1. one\n2. two\n> quoted\n> more\n---", None);
        assert_eq!(
            html,
            "<ul><li>a</li><li>b</li></ul>\n<ol><li>one</li><li>two</li></ol>\n<blockquote><p>quoted</p><p>more</p></blockquote>\n<hr>"
        );
    }

    #[test]
    fn test_table_with_header() {
        let html = render_html("| K | V |\n| --- | --- |\n| a\\|b | <em>1</em> |", None);
        assert_eq!(
            html,
            "<table><thead><tr><th>K</th><th>V</th></tr></thead><tbody><tr><td>a|b</td><td><em>1</em></td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_table_without_header() {
        assert_eq!(render_html("| a | b |", None), "<table><tbody><tr><td>a</td><td>b</td></tr></tbody></table>");
    }

    #[test]
    fn test_script_is_escaped() {
        let html = render_html("Hi <script>alert(1)</script>", None);
        assert_eq!(html, "<p>Hi &lt;script&gt;alert(1)&lt;/script&gt;</p>");
    }

    #[rstest]
    #[case("<em>a</em> <strong>b</strong>", "<em>a</em> <strong>b</strong>")]
    #[case("<i>a</i> <b>b</b>", "<em>a</em> <strong>b</strong>")]
    #[case("<em><strong>x</strong></em>", "<em><strong>x</strong></em>")]
    #[case("<em>a<strong>b</em>c</strong>", "&lt;em&gt;a<strong>b&lt;/em&gt;c</strong>")]
    #[case("<em>open only", "&lt;em&gt;open only")]
    #[case("<em class=x>a</em>", "&lt;em class=x&gt;a&lt;/em&gt;")]
    #[case("<span>a</span>", "&lt;span&gt;a&lt;/span&gt;")]
    fn test_inline_whitelist(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(render_inline(input), expected);
    }

    #[rstest]
    #[case("[x](javascript:alert(1))")]
    #[case("[x](data:text/html,hi)")]
    #[case("[x](vbscript:msgbox)")]
    fn test_unsafe_links_stay_text(#[case] input: &str) {
        let html = render_inline(input);
        assert!(!html.contains("<a "), "{html}");
    }

    #[rstest]
    #[case("[home](/)", "/")]
    #[case("[top](#top)", "#top")]
    #[case("[mail](mailto:a@x.example)", "mailto:a@x.example")]
    #[case("[q](https://x.example/?a=1&b=2)", "https://x.example/?a=1&amp;b=2")]
    fn test_safe_links(#[case] input: &str, #[case] href: &str) {
        assert!(render_inline(input).contains(&format!("href=\"{href}\"")));
    }

    #[test]
    fn test_tags_do_not_cross_links() {
        let html = render_inline("<em>[a</em>](https://x.example)");
        assert!(!html.contains("<em>"));
        assert!(html.contains("<a href=\"https://x.example\""));
    }

    #[test]
    fn test_emphasis_wraps_link() {
        let html = render_html("Read <em>the [full story](https://x.example/) here</em> today", None);
        assert_eq!(
            html,
            "<p>Read <em>the <a href=\"https://x.example/\" target=\"_blank\" rel=\"noopener noreferrer\">full story</a> here</em> today</p>"
        );
    }

    #[test]
    fn test_link_inside_bold_list_item() {
        let html = render_html("- <strong>[docs](https://x.example/docs)</strong>", None);
        assert!(html.starts_with("<ul><li><strong><a href=\"https://x.example/docs\""), "{html}");
        assert!(html.ends_with("</a></strong></li></ul>"), "{html}");
    }

    #[test]
    fn test_href_with_parentheses() {
        let html = render_html("See [Rust](https://en.wikipedia.org/wiki/Rust_(programming_language)) for details", None);
        assert_eq!(
            html,
            "<p>See <a href=\"https://en.wikipedia.org/wiki/Rust_(programming_language)\" target=\"_blank\" rel=\"noopener noreferrer\">Rust</a> for details</p>"
        );

        let html = render_html("![Logo](https://x.example/Logo_(2020).png)", None);
        assert!(html.starts_with("<figure><img src=\"https://x.example/Logo_(2020).png\""), "{html}");
    }

    #[test]
    fn test_svg_line_is_sanitized_markup() {
        let html = render_html(
            "Before\n<svg width=\"400\" height=\"300\" onload=\"evil()\"><script>evil()</script><rect width=\"10\" height=\"10\"></rect></svg>\nAfter",
            None,
        );
        let parts: Vec<&str> = html.split('\n').collect();
        assert_eq!(parts.len(), 3, "{html}");
        assert_eq!(parts[0], "<p>Before</p>");
        assert!(parts[1].starts_with("<svg"), "{html}");
        assert!(parts[1].contains("<rect"));
        assert!(!parts[1].contains("onload"));
        assert!(!parts[1].contains("script"));
        assert_eq!(parts[2], "<p>After</p>");
    }

    #[rstest]
    #[case("\\1. Not a list", "<p>1. Not a list</p>")]
    #[case("\\# Not a heading", "<p># Not a heading</p>")]
    #[case("\\Source: quoted", "<p>Source: quoted</p>")]
    #[case("\\> not a quote", "<p>&gt; not a quote</p>")]
    #[case("\\\\- one backslash", "<p>\\- one backslash</p>")]
    #[case("\\plain", "<p>\\plain</p>")]
    fn test_escaped_block_markers(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(render_html(input, None), expected);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render_html("", None), "");
        assert_eq!(render_html("\n\n   \n", None), "");
    }

    proptest! {
        #[test]
        fn prop_heading_level_never_exceeds_six(hashes in 1usize..12, text in "[a-z]{1,12}") {
            let html = render_html(&format!("{} {}", "#".repeat(hashes), text), None);
            for level in 7..=13 {
                let open_tag = format!("<h{}>", level);
                prop_assert!(!html.contains(&open_tag));
            }
        }

        #[test]
        fn prop_script_never_survives(prefix in "[a-zA-Z <>/]{0,20}", suffix in "[a-zA-Z <>/]{0,20}") {
            let html = render_html(&format!("{prefix}<script>alert(1)</script>{suffix}"), None);
            prop_assert!(!html.contains("<script"));
        }

        #[test]
        fn prop_encoded_paragraph_stays_paragraph(text in r"[-#>0-9. a-z:|\\]{1,30}") {
            prop_assume!(!text.trim().is_empty());
            let line = crate::encode::encode_block(&crate::blocks::ContentBlock::Paragraph { text });
            let html = render_html(&line, None);
            prop_assert!(html.starts_with("<p>") && html.ends_with("</p>"), "{line} -> {html}");
        }

        #[test]
        fn prop_only_whitelisted_tags_are_emitted(text in "[a-z<>/ ]{0,40}") {
            let html = render_inline(&text);
            let allowed = ["em", "strong", "u", "mark", "code", "sub", "sup", "s", "del", "ins", "abbr"];
            let mut rest = html.as_str();
            while let Some(pos) = rest.find('<') {
                let tag: String = rest[pos + 1..]
                    .trim_start_matches('/')
                    .chars()
                    .take_while(|c| c.is_ascii_alphabetic())
                    .collect();
                prop_assert!(allowed.contains(&tag.as_str()), "unexpected tag {tag} in {html}");
                rest = &rest[pos + 1..];
            }
        }
    }
}
