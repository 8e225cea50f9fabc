use std::fs;
use std::io::Write;
use std::path::Path;

/// Write `content` to `path` via a sibling temp file and rename, so readers
/// never observe a half-written file.
pub fn atomic_write_str(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));

    {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)
}

/// Convert a free-form query into a filename-safe slug.
///
/// Example: "CRM tools for Small Teams?" → "crm-tools-for-small-teams"
///
/// Capped at 60 characters: the slug sits between the `market-research-`
/// prefix and a date in export filenames, and pasted questions can run to
/// paragraphs. The cut happens on a char boundary with no dangling hyphen.
pub fn slugify(name: &str) -> String {
    let slug = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    slug.chars().take(60).collect::<String>().trim_end_matches('-').to_string()
}
