use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Configuration stored in ~/.marketbrief/config.json
///
/// Every field is optional in the file; a missing config is the same as `{}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub limits: ExtractionLimits,
    #[serde(default = "default_hero_fallback")]
    pub hero_fallback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limits: ExtractionLimits::default(),
            hero_fallback: default_hero_fallback(),
            export_dir: None,
            store_path: None,
        }
    }
}

/// Sentence shown when no report line qualifies as a hero line.
pub const DEFAULT_HERO_LINE: &str =
    "Market snapshot assembled from the latest research results.";

fn default_hero_fallback() -> String {
    DEFAULT_HERO_LINE.to_string()
}

/// Caps and heuristics thresholds for the brief extractors.
///
/// The colon window is tuned against typical LLM output: a `Label: value`
/// line has its first colon after at least three characters and well before
/// the sentence gets long enough to be prose with an incidental colon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionLimits {
    pub max_key_facts: usize,
    pub max_pricing_highlights: usize,
    pub max_sections: usize,
    pub max_bullets_per_section: usize,
    /// Exclusive lower bound on the first colon's character index.
    pub fact_colon_min: usize,
    /// Exclusive upper bound on the first colon's character index.
    pub fact_colon_max: usize,
    /// Skip lines whose first colon opens a URL scheme (`https://...`).
    pub reject_url_colons: bool,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            max_key_facts: 8,
            max_pricing_highlights: 4,
            max_sections: 3,
            max_bullets_per_section: 5,
            fact_colon_min: 2,
            fact_colon_max: 60,
            reject_url_colons: true,
        }
    }
}

/// A `label: value` pair surfaced from the report (never pricing).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyFact {
    pub label: String,
    pub value: String,
}

impl KeyFact {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A titled group of bullets derived from a heading and the lines under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightSection {
    pub title: String,
    pub bullets: Vec<String>,
}

/// Everything derived from one raw report, ready for display or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchBrief {
    pub query: String,
    pub raw_report: String,
    pub normalized: String,
    pub key_facts: Vec<KeyFact>,
    pub pricing_highlights: Vec<String>,
    pub insight_sections: Vec<InsightSection>,
    pub hero_line: String,
}

impl ResearchBrief {
    /// True when no extractor found anything worth showing.
    pub fn is_empty(&self) -> bool {
        self.key_facts.is_empty()
            && self.pricing_highlights.is_empty()
            && self.insight_sections.is_empty()
    }
}

/// A brief persisted for sharing. Stored as opaque JSON by the brief store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedBrief {
    pub share_token: String,
    pub created_at: DateTime<Utc>,
    pub query: String,
    pub raw_report: String,
    pub key_facts: Vec<KeyFact>,
    pub pricing_highlights: Vec<String>,
    pub insight_sections: Vec<InsightSection>,
    pub hero_line: String,
}

// =============================================================================
// Search collaborator response
// =============================================================================

/// Response shape returned by the web search / question-answering provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qa: Option<SearchAnswer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hits: Option<Vec<SearchHit>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchAnswer {
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
}
