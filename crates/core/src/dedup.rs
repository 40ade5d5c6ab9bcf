//! Removal of repeated boilerplate blocks.

use std::collections::HashSet;

use crate::blocks::ContentBlock;

/// Drops every text-bearing block whose normalized text was already seen.
///
/// Media blocks (images, videos, embeds, dividers) and blocks whose normalized
/// text is empty are always kept. The first occurrence wins, so running the
/// result through `dedupe` again changes nothing.
///
/// # Example
///
/// ```rust
/// use distill_core::{ContentBlock, dedupe};
///
/// let para = |t: &str| ContentBlock::Paragraph { text: t.to_string() };
/// let out = dedupe(vec![para("Subscribe to our newsletter"), para("Body"), para("subscribe to our  newsletter!")]);
/// assert_eq!(out, vec![para("Subscribe to our newsletter"), para("Body")]);
/// ```
pub fn dedupe(blocks: Vec<ContentBlock>) -> Vec<ContentBlock> {
    let mut seen = HashSet::new();

    blocks
        .into_iter()
        .filter(|block| {
            if block.is_media() {
                return true;
            }
            let key = block.text().map(|text| normalize(&text)).unwrap_or_default();
            key.is_empty() || seen.insert(key)
        })
        .collect()
}

/// Lowercases, strips punctuation and collapses whitespace.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
