//! Insight sections: bullets grouped under the nearest preceding heading.
//!
//! Single pass over the normalized report. Bullet de-duplication is global to
//! one build (a bullet already shown under "Pricing" will not reappear under
//! "Competitors"), so the fold state carries the seen set explicitly.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use super::tokens::{is_rule_line, strip_bullet_marker, strip_tokens};
use crate::types::{ExtractionLimits, InsightSection};

/// Title used for bullets that appear before any heading.
pub const DEFAULT_SECTION_TITLE: &str = "Insights";

fn re_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#{1,4}\s+(.+)$").unwrap())
}

/// Accumulator threaded through the line scan.
#[derive(Debug, Default)]
struct SectionFold {
    sections: Vec<InsightSection>,
    seen_bullets: HashSet<String>,
}

impl SectionFold {
    fn start_section(&mut self, title: String) {
        self.sections.push(InsightSection {
            title,
            bullets: Vec::new(),
        });
    }

    fn push_bullet(&mut self, bullet: String) {
        if self.sections.is_empty() {
            self.start_section(DEFAULT_SECTION_TITLE.to_string());
        }
        if bullet.is_empty() || !self.seen_bullets.insert(bullet.to_lowercase()) {
            return;
        }
        if let Some(current) = self.sections.last_mut() {
            current.bullets.push(bullet);
        }
    }

    fn finish(self, limits: &ExtractionLimits) -> Vec<InsightSection> {
        let mut issued: HashSet<String> = HashSet::new();

        let mut sections: Vec<InsightSection> = self
            .sections
            .into_iter()
            .map(|mut section| {
                section.title = unique_title(&section.title, &mut issued);
                section.bullets.truncate(limits.max_bullets_per_section);
                section
            })
            .filter(|section| !section.bullets.is_empty())
            .collect();

        sections.truncate(limits.max_sections);
        sections
    }
}

/// First of `title`, `title 2`, `title 3`, ... not issued yet. A literal
/// `## A 2` heading counts as issued, so a later `## A` becomes `A 3`.
fn unique_title(title: &str, issued: &mut HashSet<String>) -> String {
    let mut candidate = title.to_string();
    let mut suffix = 2;
    while issued.contains(&candidate) {
        candidate = format!("{} {}", title, suffix);
        suffix += 1;
    }
    issued.insert(candidate.clone());
    candidate
}

/// Group report bullets into at most 3 titled sections of at most 5 bullets.
pub fn build_insight_sections(normalized: &str) -> Vec<InsightSection> {
    build_insight_sections_with(normalized, &ExtractionLimits::default())
}

pub fn build_insight_sections_with(
    normalized: &str,
    limits: &ExtractionLimits,
) -> Vec<InsightSection> {
    if normalized.trim().is_empty() {
        return Vec::new();
    }

    let mut fold = SectionFold::default();

    for line in normalized.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.contains('|') || is_rule_line(trimmed) {
            continue;
        }

        if let Some(caps) = re_heading().captures(trimmed) {
            let title = strip_tokens(&caps[1]);
            if title.is_empty() {
                fold.start_section(DEFAULT_SECTION_TITLE.to_string());
            } else {
                fold.start_section(title);
            }
            continue;
        }

        let bullet = strip_tokens(&strip_bullet_marker(trimmed));
        fold.push_bullet(bullet);
    }

    let sections = fold.finish(limits);
    log::debug!("Built {} insight sections", sections.len());
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str, bullets: &[&str]) -> InsightSection {
        InsightSection {
            title: title.to_string(),
            bullets: bullets.iter().map(|b| b.to_string()).collect(),
        }
    }

    #[test]
    fn groups_bullets_under_headings() {
        let text = "## Pricing\n- Starter plan is $29/month\n- Pro plan is $99/month\n\n## Competitors\n- Acme Corp leads the market\n- Acme Corp leads the market";
        assert_eq!(
            build_insight_sections(text),
            vec![
                section("Pricing", &["Starter plan is $29/month", "Pro plan is $99/month"]),
                section("Competitors", &["Acme Corp leads the market"]),
            ]
        );
    }

    #[test]
    fn empty_input() {
        assert!(build_insight_sections("").is_empty());
        assert!(build_insight_sections("  \n\n ").is_empty());
    }

    #[test]
    fn bullets_before_heading_go_to_default_section() {
        let text = "Acme is growing fast\n1. Second point\n## Risks\n- Churn";
        assert_eq!(
            build_insight_sections(text),
            vec![
                section("Insights", &["Acme is growing fast", "Second point"]),
                section("Risks", &["Churn"]),
            ]
        );
    }

    #[test]
    fn bullets_dedup_across_sections_case_insensitively() {
        let text = "## One\n- Strong brand\n## Two\n- strong BRAND\n- New entrant";
        let sections = build_insight_sections(text);
        assert_eq!(
            sections,
            vec![section("One", &["Strong brand"]), section("Two", &["New entrant"])]
        );

        let mut seen = HashSet::new();
        for s in &sections {
            for b in &s.bullets {
                assert!(seen.insert(b.to_lowercase()), "duplicate bullet {}", b);
            }
        }
    }

    #[test]
    fn empty_sections_dropped_and_titles_disambiguated() {
        let text = "## Overview\n## Overview\n- First\n## Overview\n- Second\n# Empty\n---\n| a | b |";
        assert_eq!(
            build_insight_sections(text),
            vec![section("Overview 2", &["First"]), section("Overview 3", &["Second"])]
        );
    }

    #[test]
    fn generated_title_skips_literal_heading() {
        let text = "## A\n- x\n## A 2\n- y\n## A\n- z";
        assert_eq!(
            build_insight_sections(text),
            vec![section("A", &["x"]), section("A 2", &["y"]), section("A 3", &["z"])]
        );
    }

    #[test]
    fn caps_sections_and_bullets() {
        let mut text = String::new();
        for s in 1..=5 {
            text.push_str(&format!("### Section {}\n", s));
            for b in 1..=8 {
                text.push_str(&format!("- Point {}.{}\n", s, b));
            }
        }
        let sections = build_insight_sections(&text);
        assert_eq!(sections.len(), 3);
        for (i, s) in sections.iter().enumerate() {
            assert_eq!(s.title, format!("Section {}", i + 1));
            assert_eq!(s.bullets.len(), 5);
            assert_eq!(s.bullets[0], format!("Point {}.1", i + 1));
        }
    }

    #[test]
    fn markup_only_heading_defaults_title() {
        let text = "## **\n- Item";
        assert_eq!(build_insight_sections(text), vec![section("Insights", &["Item"])]);
    }

    #[test]
    fn deep_headings_are_bullets() {
        let text = "##### Tiny heading\n- Item";
        assert_eq!(
            build_insight_sections(text),
            vec![section("Insights", &["Tiny heading", "Item"])]
        );
    }

    #[test]
    fn never_returns_empty_sections() {
        let text = "# A\n# B\n- **\n# C\n---";
        assert!(build_insight_sections(text).is_empty());
    }
}
