//! Visibility filter: decides whether a subtree is eligible for extraction.
//!
//! Only attribute and inline-style signals are inspected. Computed or
//! cascaded styles are never resolved, so elements hidden by a stylesheet
//! class still pass the filter.

use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;

/// Tags that never hold readable content
pub const SKIP_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "nav", "form", "input", "button", "select", "textarea",
];

/// Class/id fragments marking non-content chrome, matched as substrings of each token
pub const SKIP_PATTERNS: &[&str] = &[
    "sidebar",
    "advert",
    "ad-slot",
    "ad-container",
    "ad-wrapper",
    "adsbygoogle",
    "sponsored",
    "popup",
    "modal",
    "cookie",
    "consent",
    "gdpr",
    "overlay",
    "newsletter-signup",
];

/// Class/id tokens marking ads that are too short to match as substrings
pub const SKIP_TOKENS: &[&str] = &["ad", "ads", "advertisement", "dfp", "promo"];

/// ARIA roles for navigation and dialog chrome
pub const SKIP_ROLES: &[&str] = &["navigation", "dialog", "alertdialog", "menu", "menubar", "banner", "contentinfo"];

static HIDDEN_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(display\s*:\s*none|visibility\s*:\s*hidden|opacity\s*:\s*0(\.0*)?\s*(;|!|$))").unwrap()
});

/// Returns `true` when the element and everything beneath it should be skipped.
///
/// # Example
///
/// ```rust
/// use distill_core::{Document, should_skip};
///
/// let doc = Document::parse(r#"<div class="sidebar-widget">x</div>"#).unwrap();
/// let div = doc.select("div").unwrap()[0].as_ref();
/// assert!(should_skip(div));
/// ```
pub fn should_skip(el: ElementRef<'_>) -> bool {
    let element = el.value();

    if SKIP_TAGS.contains(&element.name()) {
        return true;
    }

    if element.attr("hidden").is_some() {
        return true;
    }

    if element
        .attr("aria-hidden")
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    {
        return true;
    }

    if element.attr("style").is_some_and(|style| HIDDEN_STYLE.is_match(style)) {
        return true;
    }

    if let Some(role) = element.attr("role")
        && role
            .split_whitespace()
            .any(|r| SKIP_ROLES.iter().any(|skip| r.eq_ignore_ascii_case(skip)))
    {
        return true;
    }

    let tokens = element
        .classes()
        .chain(element.id())
        .map(|t| t.to_ascii_lowercase());

    for token in tokens {
        if is_skip_token(&token) {
            return true;
        }
    }

    false
}

/// Returns `true` when the element or any of its ancestors should be skipped.
pub fn is_hidden_within(el: ElementRef<'_>) -> bool {
    should_skip(el) || el.ancestors().filter_map(ElementRef::wrap).any(should_skip)
}

fn is_skip_token(token: &str) -> bool {
    if SKIP_TOKENS.contains(&token) {
        return true;
    }

    // "ad-" and "-ad" prefixes/suffixes without catching words like "header" or "read"
    if token.starts_with("ad-") || token.starts_with("ad_") || token.ends_with("-ad") || token.ends_with("-ads") {
        return true;
    }

    SKIP_PATTERNS.iter().any(|p| token.contains(p))
}
