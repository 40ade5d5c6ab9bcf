//! Safe-markup rewriting for vector-graphics embed payloads.

const URL_ATTRS: &[&str] = &["href", "xlink:href", "src"];

/// Strips executable content from inline SVG markup.
///
/// Removes `<script>`, `<foreignObject>`, `<iframe>` and `<object>` elements,
/// every `on*` event attribute, and any URL attribute using a `javascript:`
/// or `data:text/html` scheme. Returns `None` when the markup cannot be rewritten.
///
/// # Example
///
/// ```rust
/// use distill_core::sanitize::sanitize_svg;
///
/// let svg = r#"<svg width="100" height="100" onload="evil()"><script>evil()</script><rect/></svg>"#;
/// let clean = sanitize_svg(svg).unwrap();
/// assert!(!clean.contains("script"));
/// assert!(!clean.contains("onload"));
/// ```
pub fn sanitize_svg(markup: &str) -> Option<String> {
    let mut output = Vec::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![
                lol_html::element!("script, foreignObject, foreignobject, iframe, object, embed", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("*", |el| {
                    let unsafe_names: Vec<String> = el
                        .attributes()
                        .iter()
                        .filter(|attr| is_unsafe_attribute(&attr.name(), &attr.value()))
                        .map(|attr| attr.name())
                        .collect();

                    for name in unsafe_names {
                        el.remove_attribute(&name);
                    }
                    Ok(())
                }),
            ],
            ..Default::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    rewriter.write(markup.as_bytes()).ok()?;
    rewriter.end().ok()?;

    String::from_utf8(output).ok().filter(|s| !s.trim().is_empty())
}

fn is_unsafe_attribute(name: &str, value: &str) -> bool {
    name.to_ascii_lowercase().starts_with("on") || (URL_ATTRS.contains(&name) && is_unsafe_url(value))
}

fn is_unsafe_url(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    compact.starts_with("javascript:") || compact.starts_with("vbscript:") || compact.starts_with("data:text/html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_scripts_and_handlers() {
        let svg = r#"<svg viewBox="0 0 200 100"><script>alert(1)</script><circle onclick="x()" r="4"/></svg>"#;
        let clean = sanitize_svg(svg).unwrap();
        assert!(!clean.contains("<script"));
        assert!(!clean.contains("alert"));
        assert!(!clean.contains("onclick"));
        assert!(clean.contains("<circle"));
        assert!(clean.contains("viewBox"));
    }

    #[test]
    fn test_removes_javascript_links() {
        let svg = r#"<svg><a href=" java script:alert(1)"><text>x</text></a><a href="https://x.example">y</a></svg>"#;
        let clean = sanitize_svg(svg).unwrap();
        assert!(!clean.contains("java script"));
        assert!(clean.contains("https://x.example"));
    }

    #[test]
    fn test_removes_foreign_object() {
        let svg = r#"<svg><foreignObject><div>html</div></foreignObject><rect/></svg>"#;
        let clean = sanitize_svg(svg).unwrap();
        assert!(!clean.contains("html</div>"));
        assert!(clean.contains("<rect"));
    }

    #[test]
    fn test_empty_markup() {
        assert_eq!(sanitize_svg("   "), None);
    }
}
