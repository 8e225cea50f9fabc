//! Per-line markdown token stripping.
//!
//! Turns one markdown line into display text: no heading/quote markers, no
//! emphasis or code ticks, links reduced to their label.

use std::sync::OnceLock;

use regex::Regex;

use super::normalize::strip_boilerplate;

fn re_leading_markers() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[#>*\s|]+").unwrap())
}

fn re_link() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap())
}

fn re_trailing_pipes() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:\s+\|)+\s*$").unwrap())
}

fn re_bullet_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `-`, `*`, `+`, `•` bullets and `1.` / `1)` ordinals
    RE.get_or_init(|| Regex::new(r"^\s*(?:[-*+•]|\d+[.)])\s+").unwrap())
}

fn re_rule_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-{3,}$").unwrap())
}

/// Strip markdown syntax from a single line, producing plain display text.
///
/// Never fails; a line made only of markup comes back empty.
pub fn strip_tokens(line: &str) -> String {
    let text = re_leading_markers().replace(line, "");
    let text = text.replace(['*', '_', '`'], "");
    let text = re_link().replace_all(&text, "$1");
    let text = re_trailing_pipes().replace(&text, "");
    let text = strip_boilerplate(&text);

    // Normalize whitespace: collapse runs of spaces, trim
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove one leading bullet or ordinal marker (`- `, `* `, `• `, `2. `, `3) `).
pub fn strip_bullet_marker(line: &str) -> String {
    re_bullet_marker().replace(line, "").into_owned()
}

/// A markdown horizontal rule made of hyphens (`---`).
pub fn is_rule_line(line: &str) -> bool {
    re_rule_line().is_match(line.trim())
}
