//! Line-level extractors: key facts, pricing highlights and the hero line.
//!
//! All three work on normalized text and are independent of each other.
//! Pricing lines are reserved for the pricing extractor; key facts never
//! carry currency or price wording.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use super::tokens::{is_rule_line, strip_bullet_marker, strip_tokens};
use crate::types::{ExtractionLimits, KeyFact, DEFAULT_HERO_LINE};

/// Placeholder labels LLM comparison tables use as column headers.
const PLACEHOLDER_LABELS: &[&str] = &["aspect", "details"];

fn re_pricing() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\$|price|pricing|cost").unwrap())
}

/// True when the text talks about money and belongs in pricing highlights.
pub fn is_pricing_text(text: &str) -> bool {
    re_pricing().is_match(text)
}

fn is_placeholder_label(label: &str) -> bool {
    PLACEHOLDER_LABELS
        .iter()
        .any(|p| label.eq_ignore_ascii_case(p))
}

/// Split `Label: value` at the first colon, if that colon sits inside the
/// label window. Positions are character offsets, both bounds exclusive.
/// With `reject_url_colons`, a colon that opens `://` belongs to a URL, not a
/// label.
fn split_label_value<'a>(line: &'a str, limits: &ExtractionLimits) -> Option<(&'a str, &'a str)> {
    let (char_idx, (byte_idx, _)) = line.char_indices().enumerate().find(|(_, (_, c))| *c == ':')?;
    if char_idx <= limits.fact_colon_min || char_idx >= limits.fact_colon_max {
        return None;
    }
    let value = &line[byte_idx + 1..];
    if limits.reject_url_colons && value.starts_with("//") {
        return None;
    }
    Some((&line[..byte_idx], value))
}

/// Extract up to 8 non-pricing `label: value` facts.
pub fn extract_key_facts(normalized: &str) -> Vec<KeyFact> {
    extract_key_facts_with(normalized, &ExtractionLimits::default())
}

pub fn extract_key_facts_with(normalized: &str, limits: &ExtractionLimits) -> Vec<KeyFact> {
    let mut facts = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for line in normalized.lines() {
        if facts.len() >= limits.max_key_facts {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.contains('|') || is_rule_line(trimmed) {
            continue;
        }

        let candidate = strip_bullet_marker(trimmed);
        let Some((raw_label, raw_value)) = split_label_value(&candidate, limits) else {
            continue;
        };

        let label = strip_tokens(raw_label);
        let value = strip_tokens(raw_value);
        if label.is_empty() || value.is_empty() {
            continue;
        }
        if is_pricing_text(&label) || is_pricing_text(&value) {
            continue;
        }
        if is_placeholder_label(&label) {
            continue;
        }
        if !seen.insert((label.clone(), value.clone())) {
            continue;
        }

        facts.push(KeyFact { label, value });
    }

    facts
}

/// Extract up to 4 lines mentioning currency or percentages.
pub fn extract_pricing_highlights(normalized: &str) -> Vec<String> {
    extract_pricing_highlights_with(normalized, &ExtractionLimits::default())
}

pub fn extract_pricing_highlights_with(normalized: &str, limits: &ExtractionLimits) -> Vec<String> {
    let mut highlights = Vec::new();
    let mut seen = HashSet::new();

    for line in normalized.lines() {
        if highlights.len() >= limits.max_pricing_highlights {
            break;
        }

        let stripped = strip_tokens(line);
        let candidate = strip_bullet_marker(&stripped).trim().to_string();
        if candidate.is_empty() || candidate.contains('|') {
            continue;
        }
        if !candidate.contains('$') && !candidate.contains('%') {
            continue;
        }
        if seen.insert(candidate.to_lowercase()) {
            highlights.push(candidate);
        }
    }

    highlights
}

/// Pick the first real sentence of the report as a subtitle.
///
/// Skips comparison-table headers (`Aspect ...`) and report titles mentioning
/// "Market Research".
pub fn select_hero_line(normalized: &str) -> String {
    select_hero_line_with(normalized, DEFAULT_HERO_LINE)
}

pub fn select_hero_line_with(normalized: &str, fallback: &str) -> String {
    let candidate = normalized
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with("Aspect") && !l.contains("Market Research"));

    match candidate.map(strip_tokens) {
        Some(hero) if !hero.is_empty() => hero,
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn founded_kept_price_excluded() {
        let facts = extract_key_facts("Founded: 2015\nPrice: $10");
        assert_eq!(facts, vec![KeyFact::new("Founded", "2015")]);
    }

    #[test]
    fn caps_at_eight_in_order() {
        let text = (1..=20)
            .map(|i| format!("Label {}: Value {}", i, i))
            .collect::<Vec<_>>()
            .join("\n");
        let facts = extract_key_facts(&text);
        assert_eq!(facts.len(), 8);
        for (i, fact) in facts.iter().enumerate() {
            assert_eq!(fact.label, format!("Label {}", i + 1));
            assert_eq!(fact.value, format!("Value {}", i + 1));
        }
    }

    #[test]
    fn dedups_label_value_pairs() {
        let text = "City: Austin\n- City: Austin\n**City:** Austin\nCity: Denver";
        let facts = extract_key_facts(text);
        assert_eq!(
            facts,
            vec![KeyFact::new("City", "Austin"), KeyFact::new("City", "Denver")]
        );
    }

    #[test]
    fn strips_bullets_and_markup() {
        let facts = extract_key_facts("- **Headquarters:** [Austin](https://maps.example.com)");
        assert_eq!(facts, vec![KeyFact::new("Headquarters", "Austin")]);
    }

    #[test]
    fn colon_window_is_exclusive() {
        // Colon at index 2 is too early, index 3 is the first accepted.
        assert!(extract_key_facts("ab: too short").is_empty());
        assert_eq!(extract_key_facts("abc: ok"), vec![KeyFact::new("abc", "ok")]);

        let at_sixty = format!("{}: value", "x".repeat(60));
        assert!(extract_key_facts(&at_sixty).is_empty());
        let at_fifty_nine = format!("{}: value", "x".repeat(59));
        assert_eq!(extract_key_facts(&at_fifty_nine).len(), 1);
    }

    #[test]
    fn first_colon_decides() {
        // A URL in prose puts the first colon far from a label-like prefix.
        let line = "Read the full competitive analysis of the enterprise segment here https://acme.com";
        assert!(extract_key_facts(line).is_empty());
    }

    #[test]
    fn url_colons_are_not_labels() {
        let text = "- [Acme](https://acme.com)\n<https://beta.io/pricing>\nWebsite: https://acme.com";
        assert_eq!(
            extract_key_facts(text),
            vec![KeyFact::new("Website", "https://acme.com")]
        );
    }

    #[test]
    fn url_colon_rule_can_be_disabled() {
        let limits = ExtractionLimits {
            reject_url_colons: false,
            ..ExtractionLimits::default()
        };
        assert_eq!(
            extract_key_facts_with("Team page https://beta.io", &limits),
            vec![KeyFact::new("Team page https", "//beta.io")]
        );
    }

    #[test]
    fn skips_tables_rules_placeholders_and_empty_halves() {
        let text = "| Founded: 2015 | x |\n---\nAspect: Acme\ndetails: more\nEmpty:\n**:** nothing";
        assert!(extract_key_facts(text).is_empty());
    }

    #[test]
    fn never_returns_pricing_facts() {
        let text = "Monthly Cost: $49\nPricing model: per seat\nSegment: SMB\nDiscount: 20% off list price";
        let facts = extract_key_facts(text);
        assert_eq!(facts, vec![KeyFact::new("Segment", "SMB")]);
        for fact in &facts {
            assert!(!is_pricing_text(&fact.label));
            assert!(!is_pricing_text(&fact.value));
        }
        assert!(extract_pricing_highlights(text).contains(&"Monthly Cost: $49".to_string()));
    }

    #[test]
    fn custom_limits() {
        let limits = ExtractionLimits {
            max_key_facts: 2,
            ..ExtractionLimits::default()
        };
        let facts = extract_key_facts_with("A1x: 1\nB2x: 2\nC3x: 3", &limits);
        assert_eq!(facts.len(), 2);
    }

    #[test]
    fn pricing_example_from_report() {
        let text = "## Pricing\n- Starter plan is $29/month\n- Pro plan is $99/month\n\n## Competitors\n- Acme Corp leads the market\n- Acme Corp leads the market";
        assert_eq!(
            extract_pricing_highlights(text),
            vec!["Starter plan is $29/month", "Pro plan is $99/month"]
        );
    }

    #[test]
    fn pricing_dedups_case_insensitively_and_caps() {
        let text = "- Growth of 12%\n- GROWTH OF 12%\n* $5 add-on\n1. Churn at 3%\n- Margin 60%\n- Extra $1";
        let highlights = extract_pricing_highlights(text);
        assert_eq!(
            highlights,
            vec!["Growth of 12%", "$5 add-on", "Churn at 3%", "Margin 60%"]
        );
    }

    #[test]
    fn pricing_skips_table_rows() {
        let text = "| Plan | $29 |\n| Pro | $99 | x |\nPlain line";
        assert!(extract_pricing_highlights(text).is_empty());
    }

    #[test]
    fn hero_skips_table_header_and_title() {
        let text = "Aspect | Details\nMarket Research Notes\nThis vendor ships globally.";
        assert_eq!(select_hero_line(text), "This vendor ships globally.");
    }

    #[test]
    fn hero_strips_markup() {
        assert_eq!(select_hero_line("\n\n## **Acme** at a glance"), "Acme at a glance");
    }

    #[test]
    fn hero_falls_back() {
        assert_eq!(select_hero_line(""), DEFAULT_HERO_LINE);
        assert_eq!(select_hero_line("Aspect one\nMarket Research"), DEFAULT_HERO_LINE);
        assert_eq!(select_hero_line("**"), DEFAULT_HERO_LINE);
        assert_eq!(select_hero_line_with("", "Custom"), "Custom");
    }
}
