//! Image source resolution for lazy-loaded and placeholder images.

use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;
use url::Url;

/// Lazy-load attributes checked, in order, when the declared source is a placeholder
pub const LAZY_SRC_ATTRS: &[&str] = &[
    "data-src",
    "data-lazy-src",
    "data-original",
    "data-lazy",
    "data-url",
    "data-hi-res-src",
    "data-full-src",
    "data-orig-file",
];

/// Source-set attributes, checked after [`LAZY_SRC_ATTRS`]
pub const SRCSET_ATTRS: &[&str] = &["data-srcset", "data-lazy-srcset", "srcset"];

static PLACEHOLDER_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)((^|/)(blank|spacer|pixel|placeholder|transparent|loading|lazy|empty|1x1|clear)([-_]?(\d+x\d+|\d+|img|image|gif|pixel|placeholder))?\.(gif|png|svg|jpe?g|webp)(\?|#|$)|/(pixel|beacon|track(ing)?)(\?|/|$)|[?&](width|w)=1(&|$)|doubleclick\.net|facebook\.com/tr)",
    )
    .unwrap()
});

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)?)").unwrap());

static STYLE_WIDTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|;)\s*width\s*:\s*(\d+(?:\.\d+)?)px").unwrap());

/// Resolves the usable source URL of an `<img>`, or `None` when the image should be dropped.
///
/// A declared `src` is treated as a placeholder when it is missing, a data URI,
/// declared near-zero wide, or shaped like a known spacer/tracking pixel. Placeholders
/// fall back to [`LAZY_SRC_ATTRS`] and then to the first candidate of a source set.
/// Images declaring a width below `min_width` are dropped.
///
/// # Example
///
/// ```rust
/// use distill_core::{Document, resolve_image_src};
///
/// let html = r#"<img src="/blank.gif" data-src="https://cdn.example.com/photo.jpg">"#;
/// let doc = Document::parse(html).unwrap();
/// let img = doc.select("img").unwrap()[0].as_ref();
/// assert_eq!(resolve_image_src(img, None, 100).as_deref(), Some("https://cdn.example.com/photo.jpg"));
/// ```
pub fn resolve_image_src(img: ElementRef<'_>, base: Option<&Url>, min_width: u32) -> Option<String> {
    let element = img.value();

    if let Some(width) = declared_width(img)
        && width > 1.0
        && width < f64::from(min_width)
    {
        return None;
    }

    let declared = element.attr("src").map(str::trim).filter(|s| !s.is_empty());
    let near_zero = declared_width(img).is_some_and(|w| w <= 1.0);

    if let Some(src) = declared
        && !near_zero
        && !is_placeholder(src)
        && let Some(url) = absolute_url(src, base)
    {
        return Some(url);
    }

    for attr in LAZY_SRC_ATTRS {
        if let Some(candidate) = element.attr(attr)
            && !is_placeholder(candidate)
            && let Some(url) = absolute_url(candidate, base)
        {
            return Some(url);
        }
    }

    for attr in SRCSET_ATTRS {
        if let Some(candidate) = element.attr(attr).and_then(first_srcset_candidate)
            && !is_placeholder(candidate)
            && let Some(url) = absolute_url(candidate, base)
        {
            return Some(url);
        }
    }

    None
}

/// Returns `true` for data URIs and known placeholder or tracking-pixel shapes.
pub fn is_placeholder(src: &str) -> bool {
    let src = src.trim();
    src.is_empty() || src.starts_with("data:") || PLACEHOLDER_URL.is_match(src)
}

/// Width declared by the `width` attribute or an inline `width: Npx` style.
pub fn declared_width(img: ElementRef<'_>) -> Option<f64> {
    let element = img.value();
    if let Some(width) = element.attr("width").and_then(parse_dimension) {
        return Some(width);
    }

    element
        .attr("style")
        .and_then(|style| STYLE_WIDTH.captures(style))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Parses the leading number of a dimension attribute (`"640"`, `"640px"`).
/// Percentages are not absolute and yield `None`.
pub fn parse_dimension(value: &str) -> Option<f64> {
    if value.trim_end().ends_with('%') {
        return None;
    }
    LEADING_NUMBER
        .captures(value)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn first_srcset_candidate(srcset: &str) -> Option<&str> {
    srcset
        .split(',')
        .filter_map(|candidate| candidate.split_whitespace().next())
        .next()
}

/// Absolute or root-relative form of `src`, joined onto `base` when known.
pub(crate) fn absolute_url(src: &str, base: Option<&Url>) -> Option<String> {
    let src = src.trim();
    if src.is_empty() || src.starts_with("data:") {
        return None;
    }

    if let Some(rest) = src.strip_prefix("//") {
        return Some(format!("https://{}", rest));
    }

    if let Ok(url) = Url::parse(src) {
        return matches!(url.scheme(), "http" | "https").then(|| url.to_string());
    }

    match base {
        Some(base) => base.join(src).ok().map(String::from),
        None if src.starts_with('/') => Some(src.to_string()),
        None => None,
    }
}
