//! Market research briefs from raw search/LLM report text.
//!
//! The core is a set of pure text transforms: `research` turns a raw report
//! into key facts, pricing highlights, insight sections and a hero line;
//! `render` turns it into an escaped, standalone HTML document. The remaining
//! modules are the thin shell a host needs around that core: config, search
//! response assembly, persistence with share tokens, and file export.

pub mod error;
pub mod export;
pub mod render;
pub mod research;
pub mod search;
pub mod state;
pub mod store;
pub mod types;
pub mod util;

pub use error::{BriefError, ErrorPayload};
pub use render::{markdown_to_html, render_brief_html, render_report_html};
pub use research::{
    build_brief, build_insight_sections, extract_key_facts, extract_pricing_highlights,
    normalize, select_hero_line, strip_tokens,
};
pub use types::{Config, ExtractionLimits, InsightSection, KeyFact, ResearchBrief, SavedBrief};
