//! Raw report assembly from a search provider response.
//!
//! The provider either answers directly (`qa.answer`) or returns only hits.
//! With an answer, the hits are appended as a source list. Without one, the
//! hits are laid out as a markdown report the pipeline can still extract
//! from; summarizing hits into prose is left to the caller's LLM step.

use std::collections::HashSet;

use crate::error::BriefError;
use crate::types::{SearchHit, SearchResponse};

/// Maximum number of sources appended under an answer.
const MAX_SOURCES: usize = 5;

/// Parse a provider response body.
pub fn parse_search_response(json: &str) -> Result<SearchResponse, BriefError> {
    serde_json::from_str(json).map_err(|e| BriefError::InvalidSearchResponse(e.to_string()))
}

fn usable_hits(response: &SearchResponse) -> Vec<&SearchHit> {
    let mut seen = HashSet::new();
    response
        .hits
        .iter()
        .flatten()
        .filter(|hit| !hit.title.trim().is_empty() || !hit.url.trim().is_empty())
        .filter(|hit| hit.url.trim().is_empty() || seen.insert(hit.url.trim().to_string()))
        .collect()
}

fn source_line(hit: &SearchHit) -> String {
    let title = hit.title.trim();
    let url = hit.url.trim();
    match (title.is_empty(), url.is_empty()) {
        (false, false) => format!("- [{}]({})", title, url),
        (true, false) => format!("- <{}>", url),
        _ => format!("- {}", title),
    }
}

/// Build the raw report text for one search.
pub fn compose_raw_report(response: &SearchResponse) -> String {
    let hits = usable_hits(response);
    let answer = response
        .qa
        .as_ref()
        .map(|qa| qa.answer.trim())
        .filter(|a| !a.is_empty());

    if let Some(answer) = answer {
        let mut report = answer.to_string();
        let sources: Vec<String> = hits
            .iter()
            .filter(|hit| !hit.url.trim().is_empty())
            .take(MAX_SOURCES)
            .map(|hit| source_line(hit))
            .collect();
        if !sources.is_empty() {
            report.push_str("\n\nSources:\n");
            report.push_str(&sources.join("\n"));
        }
        return report;
    }

    if hits.is_empty() {
        log::warn!("Search response had neither an answer nor usable hits");
        return String::new();
    }

    log::debug!("No direct answer; composing report from {} hits", hits.len());
    let mut sections = Vec::with_capacity(hits.len());
    for hit in hits {
        let title = hit.title.trim();
        let heading = if title.is_empty() { hit.url.trim() } else { title };
        let mut section = format!("## {}", heading);
        let description = hit.description.trim();
        if !description.is_empty() {
            section.push_str(&format!("\n- {}", description));
        }
        if !hit.url.trim().is_empty() {
            section.push_str(&format!("\n<{}>", hit.url.trim()));
        }
        sections.push(section);
    }
    sections.join("\n\n")
}
