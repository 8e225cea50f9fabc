//! Saved briefs and share tokens.
//!
//! The host decides where briefs live; `BriefStore` is the seam. The bundled
//! `JsonFileStore` keeps every saved brief in one pretty-printed JSON array
//! and hands out a UUID share token per save.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::BriefError;
use crate::types::{ResearchBrief, SavedBrief};
use crate::util::atomic_write_str;

/// Persistence for computed briefs.
pub trait BriefStore {
    /// Persist a brief and return it with its new share token.
    fn save(&self, brief: &ResearchBrief) -> Result<SavedBrief, BriefError>;

    /// Look up a brief by share token.
    fn load(&self, share_token: &str) -> Result<SavedBrief, BriefError>;

    /// All saved briefs, newest first.
    fn list(&self) -> Result<Vec<SavedBrief>, BriefError>;
}

/// Snapshot a brief for storage under a fresh share token.
pub fn saved_from_brief(brief: &ResearchBrief) -> SavedBrief {
    SavedBrief {
        share_token: uuid::Uuid::new_v4().to_string(),
        created_at: Utc::now(),
        query: brief.query.clone(),
        raw_report: brief.raw_report.clone(),
        key_facts: brief.key_facts.clone(),
        pricing_highlights: brief.pricing_highlights.clone(),
        insight_sections: brief.insight_sections.clone(),
        hero_line: brief.hero_line.clone(),
    }
}

/// Brief store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<SavedBrief>, BriefError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&data)?)
    }

    fn write_all(&self, briefs: &[SavedBrief]) -> Result<(), BriefError> {
        let json = serde_json::to_string_pretty(briefs)?;
        atomic_write_str(&self.path, &json)?;
        Ok(())
    }
}

impl BriefStore for JsonFileStore {
    fn save(&self, brief: &ResearchBrief) -> Result<SavedBrief, BriefError> {
        let mut briefs = self.read_all()?;
        let saved = saved_from_brief(brief);
        briefs.push(saved.clone());
        self.write_all(&briefs)?;
        log::info!(
            "Saved brief '{}' as {} in {}",
            saved.query,
            saved.share_token,
            self.path.display()
        );
        Ok(saved)
    }

    fn load(&self, share_token: &str) -> Result<SavedBrief, BriefError> {
        self.read_all()?
            .into_iter()
            .find(|b| b.share_token == share_token)
            .ok_or_else(|| BriefError::BriefNotFound(share_token.to_string()))
    }

    fn list(&self) -> Result<Vec<SavedBrief>, BriefError> {
        let mut briefs = self.read_all()?;
        briefs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(briefs)
    }
}
