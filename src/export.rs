//! Brief downloads: the rendered HTML document and the untouched markdown.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::BriefError;
use crate::render::render_brief_html;
use crate::types::ResearchBrief;
use crate::util::{atomic_write_str, slugify};

/// `market-research-<query-slug>-<YYYY-MM-DD>`, without extension.
pub fn export_file_stem(query: &str, date: NaiveDate) -> String {
    let slug = slugify(query);
    if slug.is_empty() {
        format!("market-research-{}", date.format("%Y-%m-%d"))
    } else {
        format!("market-research-{}-{}", slug, date.format("%Y-%m-%d"))
    }
}

fn write_export(dir: &Path, brief: &ResearchBrief, ext: &str, content: &str) -> Result<PathBuf, BriefError> {
    let today = chrono::Local::now().date_naive();
    let path = dir.join(format!("{}.{}", export_file_stem(&brief.query, today), ext));
    atomic_write_str(&path, content)?;
    log::info!("Exported {} report to {}", ext, path.display());
    Ok(path)
}

/// Write the standalone HTML report into `dir`.
pub fn export_html(dir: &Path, brief: &ResearchBrief) -> Result<PathBuf, BriefError> {
    write_export(dir, brief, "html", &render_brief_html(brief))
}

/// Write the raw report exactly as received into `dir`.
pub fn export_markdown(dir: &Path, brief: &ResearchBrief) -> Result<PathBuf, BriefError> {
    write_export(dir, brief, "md", &brief.raw_report)
}
