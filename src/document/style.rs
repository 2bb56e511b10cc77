//! Inline style inspection.
//!
//! Static HTML has no layout engine behind it, so computed visibility and box
//! size are approximated from what the markup itself declares: the `style`
//! attribute, the `hidden` attribute and legacy `width`/`height` attributes.

/// Value of `property` in an inline `style` attribute (last declaration wins).
#[must_use]
pub fn inline_declaration<'a>(style: &'a str, property: &str) -> Option<&'a str> {
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .filter(|(name, _)| name.trim().eq_ignore_ascii_case(property))
        .map(|(_, value)| value.trim().trim_end_matches("!important").trim())
        .last()
}

/// Parse a CSS length in pixels (`"120px"`, `"120"`, `"120.5px"`).
///
/// Relative units cannot be resolved without layout and yield `None`.
#[must_use]
pub fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

/// Whether an inline style hides the element on its own.
#[must_use]
pub fn style_hides(style: &str) -> bool {
    if inline_declaration(style, "display").is_some_and(|v| v.eq_ignore_ascii_case("none")) {
        return true;
    }
    if inline_declaration(style, "visibility")
        .is_some_and(|v| v.eq_ignore_ascii_case("hidden") || v.eq_ignore_ascii_case("collapse"))
    {
        return true;
    }
    inline_declaration(style, "opacity")
        .and_then(|v| v.parse::<f64>().ok())
        .is_some_and(|opacity| opacity <= 0.0)
}
