//! Block classifier and tree walker.
//!
//! Walks the located root in document order and turns each eligible element
//! into at most one [`ContentBlock`] (a paragraph may be followed by the images
//! it holds). When an element yields a composite block, its whole subtree is
//! recorded in an exclusion set so no descendant is emitted twice.

use std::collections::HashSet;
use std::sync::LazyLock;

use ego_tree::NodeId;
use regex::Regex;
use scraper::ElementRef;
use tracing::trace;
use url::Url;

use crate::blocks::{ContentBlock, EmbedPayload};
use crate::extract::ExtractConfig;
use crate::images::{absolute_url, parse_dimension, resolve_image_src};
use crate::inline::{direct_text, serialize_inline, serialize_nodes};
use crate::sanitize::sanitize_svg;
use crate::visibility::should_skip;

/// Generic wrappers that may stand in for a paragraph
pub const CONTAINER_TAGS: &[&str] = &["div", "section", "article", "main", "span", "center"];

/// Tags whose presence below a wrapper means the wrapper is not itself a paragraph
pub const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "main", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "dl", "table", "pre",
    "blockquote", "figure", "hr", "video", "iframe", "svg",
];

/// Frame and embed sources accepted as content, matched as `host/path` prefixes
/// (a leading `www.` on the host is ignored)
pub const EMBED_ALLOW_LIST: &[&str] = &[
    "youtube.com/embed/",
    "youtube-nocookie.com/embed/",
    "player.vimeo.com/video/",
    "dailymotion.com/embed/",
    "player.twitch.tv/",
    "open.spotify.com/embed/",
    "w.soundcloud.com/player",
    "codepen.io/",
    "platform.twitter.com/embed/",
    "loom.com/embed/",
    "embed.ted.com/",
    "google.com/maps/embed",
];

static CODE_LANGUAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(?:language|lang)-([\w+#-]+)").unwrap());

/// Walks `root` and returns its blocks in document order.
///
/// The root itself is never rejected by the visibility filter; everything
/// beneath it is.
///
/// # Example
///
/// ```rust
/// use distill_core::{Document, ExtractConfig, walk};
///
/// let doc = Document::parse("<h2>Intro</h2><p>Body text</p><hr>").unwrap();
/// let blocks = walk(doc.body(), None, &ExtractConfig::default());
/// assert_eq!(blocks.len(), 3);
/// ```
pub fn walk(root: ElementRef<'_>, base: Option<&Url>, config: &ExtractConfig) -> Vec<ContentBlock> {
    let mut walker = Walker { base, config, visited: HashSet::new(), blocks: Vec::new() };
    walker.run(root);
    walker.blocks
}

/// Returns `true` when `src` is served by a known content-embedding provider.
///
/// ```rust
/// use distill_core::walker::is_allowed_embed;
///
/// assert!(is_allowed_embed("https://www.youtube.com/embed/abc123"));
/// assert!(!is_allowed_embed("https://ads.example.net/frame?slot=1"));
/// ```
pub fn is_allowed_embed(src: &str) -> bool {
    let Ok(url) = Url::parse(src) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    let Some(host) = url.host_str() else {
        return false;
    };

    let target = format!("{}{}", host.trim_start_matches("www."), url.path());
    EMBED_ALLOW_LIST.iter().any(|pattern| target.starts_with(pattern))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    /// The element produced (or deliberately swallowed) a composite block.
    Consumed,
    Descend,
}

struct Walker<'c> {
    base: Option<&'c Url>,
    config: &'c ExtractConfig,
    visited: HashSet<NodeId>,
    blocks: Vec<ContentBlock>,
}

impl Walker<'_> {
    fn run(&mut self, root: ElementRef<'_>) {
        let root_id = root.id();
        let mut stack = vec![*root];

        while let Some(node) = stack.pop() {
            let Some(el) = ElementRef::wrap(node) else {
                continue;
            };
            if self.visited.contains(&el.id()) {
                continue;
            }
            if el.id() != root_id && should_skip(el) {
                continue;
            }

            if self.classify(el) == Visit::Consumed {
                self.consume(el);
                continue;
            }

            self.visited.insert(el.id());
            let children: Vec<_> = node.children().collect();
            stack.extend(children.into_iter().rev());
        }
    }

    fn classify(&mut self, el: ElementRef<'_>) -> Visit {
        let name = el.value().name();
        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => self.heading(el, name),
            "p" => {
                self.paragraph(el);
                Visit::Consumed
            }
            "img" => {
                if let Some(block) = self.image(el, None) {
                    self.emit(block);
                }
                Visit::Consumed
            }
            "figure" => self.figure(el),
            "video" => {
                self.video(el);
                Visit::Consumed
            }
            "ul" | "ol" => {
                self.list(el, name == "ol");
                Visit::Consumed
            }
            "pre" | "code" => {
                self.code(el);
                Visit::Consumed
            }
            "blockquote" => {
                self.quote(el);
                Visit::Consumed
            }
            "table" => {
                self.table(el);
                Visit::Consumed
            }
            "hr" => {
                self.emit(ContentBlock::Divider);
                Visit::Consumed
            }
            "svg" => {
                self.svg(el);
                Visit::Consumed
            }
            "iframe" => {
                self.frame(el);
                Visit::Consumed
            }
            "embed" | "object" => {
                self.embed(el);
                Visit::Consumed
            }
            _ if CONTAINER_TAGS.contains(&name) => self.container(el),
            _ => Visit::Descend,
        }
    }

    fn emit(&mut self, block: ContentBlock) {
        trace!(kind = block.kind(), "emitted block");
        self.blocks.push(block);
    }

    /// Marks every node under `el` as processed.
    fn consume(&mut self, el: ElementRef<'_>) {
        self.visited.extend(el.descendants().map(|node| node.id()));
    }

    fn heading(&mut self, el: ElementRef<'_>, name: &str) -> Visit {
        let text = serialize_inline(el, self.base);
        if text.is_empty() {
            return Visit::Descend;
        }

        let level = name[1..].parse::<u8>().unwrap_or(2);
        self.emit(ContentBlock::Heading { level, text });
        Visit::Consumed
    }

    /// Emits the paragraph, then one image block per resolvable image inside it.
    fn paragraph(&mut self, el: ElementRef<'_>) {
        let text = serialize_inline(el, self.base);
        if !text.is_empty() {
            self.emit(ContentBlock::Paragraph { text });
        }

        let images: Vec<_> = visible_images(el).into_iter().filter_map(|img| self.image(img, None)).collect();
        for image in images {
            self.emit(image);
        }
    }

    fn image(&self, img: ElementRef<'_>, caption: Option<String>) -> Option<ContentBlock> {
        let src = resolve_image_src(img, self.base, self.config.min_image_width)?;
        let alt = img.value().attr("alt").map(str::trim).unwrap_or_default().to_string();
        Some(ContentBlock::Image { src, alt, caption })
    }

    fn figure(&mut self, el: ElementRef<'_>) -> Visit {
        let caption = el
            .children()
            .filter_map(ElementRef::wrap)
            .find(|c| c.value().name() == "figcaption")
            .map(|c| serialize_inline(c, self.base))
            .filter(|c| !c.is_empty());

        let block = visible_images(el).into_iter().find_map(|img| self.image(img, caption.clone()));

        match block {
            Some(block) => {
                self.emit(block);
                Visit::Consumed
            }
            None => Visit::Descend,
        }
    }

    fn video(&mut self, el: ElementRef<'_>) {
        let src = el.value().attr("src").or_else(|| {
            el.children()
                .filter_map(ElementRef::wrap)
                .filter(|c| c.value().name() == "source")
                .find_map(|c| c.value().attr("src"))
        });

        if let Some(src) = src.and_then(|s| absolute_url(s, self.base)) {
            self.emit(ContentBlock::Video { src });
        }
    }

    fn list(&mut self, el: ElementRef<'_>, ordered: bool) {
        let items: Vec<String> = el
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|c| c.value().name() == "li" && !should_skip(*c))
            .map(|li| serialize_inline(li, self.base))
            .filter(|item| !item.is_empty())
            .collect();

        if !items.is_empty() {
            self.emit(ContentBlock::List { items, ordered });
        }
    }

    fn code(&mut self, el: ElementRef<'_>) {
        let raw = el.text().collect::<String>();
        let text = raw.trim_matches('\n').trim_end();
        if text.chars().count() <= self.config.min_code_chars {
            return;
        }

        let language = code_language(el).or_else(|| {
            el.descendants()
                .filter_map(ElementRef::wrap)
                .filter(|d| d.value().name() == "code")
                .find_map(code_language)
        });
        self.emit(ContentBlock::Code { text: text.to_string(), language });
    }

    /// Each `<p>` is one line; loose text and other children between them form their own lines.
    fn quote(&mut self, el: ElementRef<'_>) {
        let mut parts = Vec::new();
        let mut run = Vec::new();
        for child in el.children() {
            match ElementRef::wrap(child) {
                Some(p) if p.value().name() == "p" => {
                    parts.push(serialize_nodes(&run, self.base));
                    run.clear();
                    if !should_skip(p) {
                        parts.push(serialize_inline(p, self.base));
                    }
                }
                _ => run.push(child),
            }
        }
        parts.push(serialize_nodes(&run, self.base));
        parts.retain(|part| !part.is_empty());

        let text = parts.join("\n");
        if !text.is_empty() {
            self.emit(ContentBlock::Quote { text });
        }
    }

    fn table(&mut self, table: ElementRef<'_>) {
        let table_id = table.id();
        let mut headers = None;
        let mut rows = Vec::new();

        let own_rows = table.descendants().filter_map(ElementRef::wrap).filter(|row| {
            row.value().name() == "tr"
                && row
                    .ancestors()
                    .filter_map(ElementRef::wrap)
                    .find(|a| a.value().name() == "table")
                    .is_some_and(|a| a.id() == table_id)
        });

        for row in own_rows {
            let cells: Vec<ElementRef<'_>> = row
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|c| matches!(c.value().name(), "td" | "th"))
                .collect();
            if cells.is_empty() {
                continue;
            }

            let texts = cells.iter().map(|c| serialize_inline(*c, self.base)).collect::<Vec<_>>();
            let has_data = cells.iter().any(|c| c.value().name() == "td");

            if !has_data {
                if headers.is_none() && rows.is_empty() {
                    headers = Some(texts);
                }
            } else {
                rows.push(texts);
            }
        }

        if !rows.is_empty() {
            self.emit(ContentBlock::Table { headers, rows });
        }
    }

    /// Icons and other small graphics are dropped.
    fn svg(&mut self, el: ElementRef<'_>) {
        let (width, height) = svg_dimensions(el);
        let min = self.config.min_embed_dimension;
        if !(width.is_some_and(|w| w > min) && height.is_some_and(|h| h > min)) {
            return;
        }

        if let Some(markup) = sanitize_svg(&el.html()) {
            self.emit(ContentBlock::Embed { payload: EmbedPayload::Markup(markup) });
        }
    }

    /// Frames become video references; raw frame markup is never kept.
    fn frame(&mut self, el: ElementRef<'_>) {
        let src = el.value().attr("src").or_else(|| el.value().attr("data-src"));
        if let Some(src) = src.and_then(|s| absolute_url(s, self.base))
            && is_allowed_embed(&src)
        {
            self.emit(ContentBlock::Video { src });
        }
    }

    fn embed(&mut self, el: ElementRef<'_>) {
        let src = el.value().attr("src").or_else(|| el.value().attr("data"));
        if let Some(src) = src.and_then(|s| absolute_url(s, self.base))
            && is_allowed_embed(&src)
        {
            self.emit(ContentBlock::Embed { payload: EmbedPayload::Source(src) });
        }
    }

    fn container(&mut self, el: ElementRef<'_>) -> Visit {
        if direct_text(el).chars().count() < self.config.min_container_chars || has_block_descendant(el) {
            return Visit::Descend;
        }

        self.paragraph(el);
        Visit::Consumed
    }
}

/// Images below `el`, never looking inside a subtree the visibility filter rejects.
fn visible_images<'a>(el: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let mut images = Vec::new();
    let mut stack: Vec<_> = el.children().rev().collect();
    while let Some(node) = stack.pop() {
        let Some(child) = ElementRef::wrap(node) else {
            continue;
        };
        if should_skip(child) {
            continue;
        }
        if child.value().name() == "img" {
            images.push(child);
        } else {
            stack.extend(node.children().rev());
        }
    }
    images
}

fn has_block_descendant(el: ElementRef<'_>) -> bool {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|d| BLOCK_TAGS.contains(&d.value().name()))
}

fn code_language(el: ElementRef<'_>) -> Option<String> {
    let element = el.value();
    element
        .attr("class")
        .and_then(|class| CODE_LANGUAGE.captures(class))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
        .or_else(|| {
            element
                .attr("data-lang")
                .or_else(|| element.attr("data-language"))
                .map(str::trim)
                .filter(|lang| !lang.is_empty())
                .map(str::to_ascii_lowercase)
        })
}

/// Declared width and height, falling back to the `viewBox` extent.
fn svg_dimensions(el: ElementRef<'_>) -> (Option<f64>, Option<f64>) {
    let element = el.value();
    let view_box: Vec<f64> = element
        .attr("viewBox")
        .or_else(|| element.attr("viewbox"))
        .map(|vb| {
            vb.split(|c: char| c.is_whitespace() || c == ',')
                .filter(|part| !part.is_empty())
                .filter_map(|part| part.parse().ok())
                .collect()
        })
        .unwrap_or_default();
    let from_view_box = |index: usize| (view_box.len() == 4).then(|| view_box[index]);

    let width = element.attr("width").and_then(parse_dimension).or_else(|| from_view_box(2));
    let height = element.attr("height").and_then(parse_dimension).or_else(|| from_view_box(3));
    (width, height)
}
