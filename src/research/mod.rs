//! Raw report → structured brief pipeline.
//!
//! `normalize` runs once, then key facts, pricing highlights, insight
//! sections and the hero line are extracted independently from the
//! normalized text. Every stage is a pure function of its input.

pub mod facts;
pub mod normalize;
pub mod sections;
pub mod tokens;

pub use facts::*;
pub use normalize::*;
pub use sections::*;
pub use tokens::*;

use crate::types::{Config, ResearchBrief};

/// Run the full pipeline for one query's raw report.
pub fn build_brief(query: &str, raw_report: &str, config: &Config) -> ResearchBrief {
    let normalized = normalize(raw_report);
    let limits = &config.limits;

    let key_facts = extract_key_facts_with(&normalized, limits);
    let pricing_highlights = extract_pricing_highlights_with(&normalized, limits);
    let insight_sections = build_insight_sections_with(&normalized, limits);
    let hero_line = select_hero_line_with(&normalized, &config.hero_fallback);

    log::debug!(
        "Brief for '{}': {} facts, {} pricing highlights, {} sections",
        query,
        key_facts.len(),
        pricing_highlights.len(),
        insight_sections.len()
    );

    ResearchBrief {
        query: query.trim().to_string(),
        raw_report: raw_report.to_string(),
        normalized,
        key_facts,
        pricing_highlights,
        insight_sections,
        hero_line,
    }
}
