//! Inline serializer and the shared inline-tag table.
//!
//! [`serialize_inline`] renders an element's inline contents as one line of
//! text: links become `[text](href)`, `<br>` becomes a newline, whitelisted
//! formatting tags survive as bare tag pairs, and every other element is
//! flattened into its children. [`INLINE_TAGS`] is the single source of truth
//! for the whitelist and is read by both the serializer and the renderer.

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};
use url::Url;

use crate::visibility::should_skip;

/// Whitelisted inline tags as `(source tag, canonical tag)` pairs.
///
/// Presentational aliases map onto their semantic equivalent; canonical
/// tags map onto themselves.
pub const INLINE_TAGS: &[(&str, &str)] = &[
    ("em", "em"),
    ("i", "em"),
    ("strong", "strong"),
    ("b", "strong"),
    ("u", "u"),
    ("mark", "mark"),
    ("code", "code"),
    ("sub", "sub"),
    ("sup", "sup"),
    ("s", "s"),
    ("strike", "s"),
    ("del", "del"),
    ("ins", "ins"),
    ("abbr", "abbr"),
];

/// Maps any whitelisted tag (canonical or alias) to its canonical name.
///
/// ```rust
/// use distill_core::inline::canonical_tag;
///
/// assert_eq!(canonical_tag("b"), Some("strong"));
/// assert_eq!(canonical_tag("em"), Some("em"));
/// assert_eq!(canonical_tag("span"), None);
/// ```
pub fn canonical_tag(name: &str) -> Option<&'static str> {
    INLINE_TAGS
        .iter()
        .find(|(source, _)| source.eq_ignore_ascii_case(name))
        .map(|(_, canonical)| *canonical)
}

/// Renders the inline contents of `el` into one line of safe text.
///
/// Relative link targets are joined onto `base` when one is given.
///
/// # Example
///
/// ```rust
/// use distill_core::{Document, serialize_inline};
///
/// let doc = Document::parse(r#"<p>Read <b>this</b> <a href="https://x.example">now</a></p>"#).unwrap();
/// let p = doc.select("p").unwrap()[0].as_ref();
/// assert_eq!(serialize_inline(p, None), "Read <strong>this</strong> [now](https://x.example)");
/// ```
pub fn serialize_inline(el: ElementRef<'_>, base: Option<&Url>) -> String {
    let mut out = String::new();
    write_children(*el, base, &mut out);
    tidy(&out)
}

/// Concatenates the element's own text nodes, ignoring descendants.
pub fn direct_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    for child in el.children() {
        if let Node::Text(text) = child.value() {
            push_text(&mut out, text);
        }
    }
    tidy(&out)
}

/// Renders a run of sibling nodes the way [`serialize_inline`] renders children.
pub fn serialize_nodes(nodes: &[NodeRef<'_, Node>], base: Option<&Url>) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(*node, base, &mut out);
    }
    tidy(&out)
}

fn write_children(node: NodeRef<'_, Node>, base: Option<&Url>, out: &mut String) {
    for child in node.children() {
        write_node(child, base, out);
    }
}

fn write_node(node: NodeRef<'_, Node>, base: Option<&Url>, out: &mut String) {
    match node.value() {
        Node::Text(text) => push_text(out, text),
        Node::Element(_) => {
            if let Some(el) = ElementRef::wrap(node) {
                write_element(el, base, out);
            }
        }
        _ => {}
    }
}

fn write_element(el: ElementRef<'_>, base: Option<&Url>, out: &mut String) {
    if should_skip(el) {
        return;
    }

    let name = el.value().name();
    match name {
        "br" => out.push('\n'),
        "a" => {
            let mut inner = String::new();
            write_children(*el, base, &mut inner);
            let label = tidy(&inner);
            match el.value().attr("href").and_then(|href| resolve_href(href, base)) {
                Some(href) if !label.is_empty() => {
                    out.push('[');
                    out.push_str(&label);
                    out.push_str("](");
                    out.push_str(&href);
                    out.push(')');
                }
                _ => out.push_str(&inner),
            }
        }
        _ => match canonical_tag(name) {
            Some(tag) => {
                let mut inner = String::new();
                write_children(*el, base, &mut inner);
                if inner.trim().is_empty() {
                    out.push_str(&inner);
                } else {
                    out.push('<');
                    out.push_str(tag);
                    out.push('>');
                    out.push_str(&inner);
                    out.push_str("</");
                    out.push_str(tag);
                    out.push('>');
                }
            }
            None => write_children(*el, base, out),
        },
    }
}

fn resolve_href(href: &str, base: Option<&Url>) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    match base {
        Some(base) if !href.starts_with('#') => base.join(href).ok().map(String::from),
        _ => Some(href.to_string()),
    }
}

/// Appends text with whitespace runs collapsed to single spaces.
fn push_text(out: &mut String, text: &str) {
    let mut last_space = out.ends_with(' ');
    for c in text.chars() {
        if c.is_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(c);
            last_space = false;
        }
    }
}

/// Trims each `<br>`-separated line and the whole result.
fn tidy(raw: &str) -> String {
    raw.split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
        .trim_matches(|c: char| c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Document;
    use rstest::rstest;

    fn inline(html: &str) -> String {
        let doc = Document::parse(html).unwrap();
        let el = doc.select("p").unwrap()[0].as_ref();
        serialize_inline(el, None)
    }

    #[rstest]
    #[case("<p>plain   text\n here</p>", "plain text here")]
    #[case("<p><i>it</i> and <b>bold</b></p>", "<em>it</em> and <strong>bold</strong>")]
    #[case("<p><strike>old</strike><del>x</del><ins>y</ins></p>", "<s>old</s><del>x</del><ins>y</ins>")]
    #[case("<p>H<sub>2</sub>O and x<sup>2</sup></p>", "H<sub>2</sub>O and x<sup>2</sup>")]
    #[case("<p><span class=\"x\">flat <span>nested</span></span></p>", "flat nested")]
    #[case("<p>a<em> </em>b</p>", "a b")]
    #[case("<p>line one<br>line two</p>", "line one\nline two")]
    #[case("<p><a href=\"https://x.example\">link text</a></p>", "[link text](https://x.example)")]
    #[case("<p><a>no href</a></p>", "no href")]
    #[case("<p><a href=\"https://x.example\"> </a>tail</p>", "tail")]
    #[case("<p><a href=\"/x\"><strong>bold link</strong></a></p>", "[<strong>bold link</strong>](/x)")]
    #[case("<p>keep<script>alert(1)</script> clean</p>", "keep clean")]
    fn test_serialize_inline(#[case] html: &str, #[case] expected: &str) {
        assert_eq!(inline(html), expected);
    }

    #[test]
    fn test_relative_href_joined_on_base() {
        let doc = Document::parse(r##"<p><a href="../about">About</a> <a href="#top">Top</a></p>"##).unwrap();
        let base = Url::parse("https://example.com/blog/post/").unwrap();
        let el = doc.select("p").unwrap()[0].as_ref();
        assert_eq!(
            serialize_inline(el, Some(&base)),
            "[About](https://example.com/blog/about) [Top](#top)"
        );
    }

    #[test]
    fn test_serialize_sibling_run() {
        let doc = Document::parse("<div>lead <em>in</em><p>skip</p> tail <span hidden>x</span></div>").unwrap();
        let div = doc.select("div").unwrap()[0].as_ref();
        let run: Vec<_> = div.children().filter(|n| ElementRef::wrap(*n).is_none_or(|e| e.value().name() != "p")).collect();
        assert_eq!(serialize_nodes(&run, None), "lead <em>in</em> tail");
    }

    #[test]
    fn test_no_raw_markup_beyond_whitelist() {
        let out = inline(r#"<p><span style="x"><font color="red">red</font></span> <img src="a.png"> <div>d</div></p>"#);
        assert!(!out.contains("<span"));
        assert!(!out.contains("<font"));
        assert!(!out.contains("<img"));
    }

    #[test]
    fn test_direct_text_ignores_children() {
        let doc = Document::parse("<div>  own   text <span>child</span> more </div>").unwrap();
        let el = doc.select("div").unwrap()[0].as_ref();
        assert_eq!(direct_text(el), "own text more");
    }

    #[test]
    fn test_canonical_tag_table() {
        assert_eq!(canonical_tag("I"), Some("em"));
        assert_eq!(canonical_tag("strike"), Some("s"));
        assert_eq!(canonical_tag("div"), None);
    }
}
