use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::BriefError;
use crate::research::build_brief;
use crate::types::{Config, ResearchBrief};

/// `~/.marketbrief`
pub fn config_dir() -> Result<PathBuf, BriefError> {
    let home = dirs::home_dir().ok_or(BriefError::HomeDirUnavailable)?;
    Ok(home.join(".marketbrief"))
}

/// Load configuration from ~/.marketbrief/config.json.
///
/// A missing file is not an error: every setting has a default.
pub fn load_config() -> Result<Config, BriefError> {
    let config_path = config_dir()?.join("config.json");
    if !config_path.exists() {
        log::debug!("No config at {}, using defaults", config_path.display());
        return Ok(Config::default());
    }
    load_config_from(&config_path)
}

/// Load configuration from an explicit path, which must exist.
pub fn load_config_from(path: &Path) -> Result<Config, BriefError> {
    if !path.exists() {
        return Err(BriefError::ConfigNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Where saved briefs live: `storePath` from config, else ~/.marketbrief/briefs.json.
pub fn store_path(config: &Config) -> Result<PathBuf, BriefError> {
    match &config.store_path {
        Some(path) => Ok(PathBuf::from(path)),
        None => Ok(config_dir()?.join("briefs.json")),
    }
}

/// Where exports are written: `exportDir` from config, else the current directory.
pub fn export_dir(config: &Config) -> PathBuf {
    config
        .export_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn brief_key(query: &str, raw_report: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(query.as_bytes());
    hasher.update([0u8]);
    hasher.update(raw_report.as_bytes());
    hex::encode(hasher.finalize())
}

/// Memoizes the most recent brief, keyed on the query and raw report text.
///
/// The pipeline is pure, so this only saves work when the host re-renders
/// with an unchanged report.
#[derive(Debug)]
pub struct BriefCache {
    config: Config,
    entry: Option<(String, ResearchBrief)>,
    builds: usize,
}

impl BriefCache {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            entry: None,
            builds: 0,
        }
    }

    /// Return the brief for this report, rebuilding only if the text changed.
    pub fn get_or_build(&mut self, query: &str, raw_report: &str) -> &ResearchBrief {
        let key = brief_key(query, raw_report);
        if self.entry.as_ref().is_some_and(|(k, _)| *k != key) {
            self.entry = None;
        }

        let config = &self.config;
        let builds = &mut self.builds;
        let (_, brief) = self.entry.get_or_insert_with(|| {
            *builds += 1;
            (key, build_brief(query, raw_report, config))
        });
        brief
    }

    /// Drop the cached brief (new search started, panel closed).
    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// How many times the pipeline actually ran.
    pub fn builds(&self) -> usize {
        self.builds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_reuses_unchanged_report() {
        let mut cache = BriefCache::new(Config::default());
        let first = cache.get_or_build("q", "Founded: 2015").clone();
        let second = cache.get_or_build("q", "Founded: 2015").clone();
        assert_eq!(first, second);
        assert_eq!(cache.builds(), 1);

        cache.get_or_build("q", "Founded: 2016");
        assert_eq!(cache.builds(), 2);
        cache.get_or_build("other", "Founded: 2016");
        assert_eq!(cache.builds(), 3);

        cache.clear();
        cache.get_or_build("other", "Founded: 2016");
        assert_eq!(cache.builds(), 4);
    }

    #[test]
    fn key_separates_query_and_report() {
        assert_ne!(brief_key("ab", "c"), brief_key("a", "bc"));
        assert_eq!(brief_key("a", "b").len(), 64);
    }

    #[test]
    fn explicit_config_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, BriefError::ConfigNotFound(_)));

        fs::write(&path, r#"{"heroFallback": "Nothing yet", "exportDir": "/tmp/out"}"#).unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.hero_fallback, "Nothing yet");
        assert_eq!(export_dir(&config), PathBuf::from("/tmp/out"));

        fs::write(&path, "{oops").unwrap();
        assert!(matches!(load_config_from(&path), Err(BriefError::Json(_))));
    }

    #[test]
    fn store_path_prefers_config() {
        let config = Config {
            store_path: Some("/data/briefs.json".to_string()),
            ..Config::default()
        };
        assert_eq!(store_path(&config).unwrap(), PathBuf::from("/data/briefs.json"));
    }
}
