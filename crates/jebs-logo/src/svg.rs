//! Text-level edits of potrace SVG output.
//!
//! Potrace writes a single `<g transform=".." fill="#000000">` holding all
//! paths. These helpers recolor it and splice several traces into one file.

use regex::{NoExpand, Regex};
use std::sync::OnceLock;

fn fill_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r##"(?i)fill="#?[^"]*""##).unwrap())
}

fn group_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<g[^>]*>.*?</g>").unwrap())
}

fn view_box_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"viewBox="([^"]+)""#).unwrap())
}

/// Replace every `fill="…"` attribute with `fill="{color}"`.
pub fn recolor_fills(svg: &str, color: &str) -> String {
    let replacement = format!(r#"fill="{color}""#);
    fill_re()
        .replace_all(svg, NoExpand(&replacement))
        .into_owned()
}

/// First `<g>…</g>` element, including its opening tag so that potrace's
/// transform is kept.
pub fn extract_group(svg: &str) -> Option<&str> {
    group_re().find(svg).map(|m| m.as_str())
}

pub fn extract_view_box(svg: &str) -> Option<&str> {
    view_box_re()
        .captures(svg)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Stack traced layers (bottom first) into one white outline SVG.
pub fn merge_outlines(view_box: &str, layers: &[&str]) -> String {
    let body = layers
        .iter()
        .filter_map(|svg| extract_group(svg))
        .map(|group| recolor_fills(group, "#fff"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="{view_box}" preserveAspectRatio="xMidYMid meet">
<g fill="#fff" stroke="none">
{body}
</g>
</svg>
"##
    )
}

/// Parse `magick -format "%w %h" info:` output.
pub fn parse_dimensions(text: &str) -> Option<(u32, u32)> {
    let mut parts = text.split_whitespace().map(str::parse::<u32>);
    match (parts.next(), parts.next()) {
        (Some(Ok(w)), Some(Ok(h))) => Some((w, h)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACE: &str = r##"<?xml version="1.0" standalone="no"?>
<svg version="1.0" xmlns="http://www.w3.org/2000/svg"
 width="1145.000000pt" height="226.000000pt" viewBox="0 0 1145.000000 226.000000"
 preserveAspectRatio="xMidYMid meet">
<g transform="translate(0.000000,226.000000) scale(0.100000,-0.100000)"
fill="#000000" stroke="none">
<path d="M10 10 l5 5z"/>
<path fill="black" d="M20 20 l5 5z"/>
</g>
</svg>"##;

    #[test]
    fn test_recolor_fills() {
        let out = recolor_fills(TRACE, "#fff");
        assert!(!out.contains("#000000"));
        assert!(!out.contains(r#"fill="black""#));
        assert_eq!(out.matches(r##"fill="#fff""##).count(), 2);
    }

    #[test]
    fn test_recolor_keeps_dollar_signs_literal() {
        assert_eq!(recolor_fills(r#"fill="red""#, "$1"), r#"fill="$1""#);
    }

    #[test]
    fn test_extract_group_keeps_transform() {
        let group = extract_group(TRACE).unwrap();
        assert!(group.starts_with("<g transform=\"translate(0.000000,226.000000)"));
        assert!(group.ends_with("</g>"));
        assert!(group.contains("M20 20"));
        assert_eq!(extract_group("<svg></svg>"), None);
    }

    #[test]
    fn test_extract_view_box() {
        assert_eq!(extract_view_box(TRACE), Some("0 0 1145.000000 226.000000"));
        assert_eq!(extract_view_box("<svg/>"), None);
    }

    #[test]
    fn test_merge_outlines() {
        let merged = merge_outlines("0 0 1145 226", &[TRACE, TRACE, "<svg/>"]);
        assert!(merged.starts_with("<?xml"));
        assert!(merged.contains(r#"viewBox="0 0 1145 226""#));
        assert_eq!(merged.matches("<g transform=").count(), 2);
        assert!(!merged.contains("#000000"));
    }

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(parse_dimensions("1145 226"), Some((1145, 226)));
        assert_eq!(parse_dimensions(" 10\n20 "), Some((10, 20)));
        assert_eq!(parse_dimensions("oops"), None);
    }
}
