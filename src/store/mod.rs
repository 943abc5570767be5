// Durable artifacts: JSON snapshots and the known-ID line file.
//
// Everything this job persists is a whole-file overwrite: the dashboard
// reads the files directly, so there is no append format and no partial
// update. Parent directories are created on demand.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Serialize `value` as pretty-printed JSON and overwrite `path` with it.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Load the known-ID set: one identifier per line, blank lines ignored.
/// A missing file is an empty set (first run).
pub fn load_known_ids(path: &Path) -> Result<BTreeSet<String>> {
    if !path.exists() {
        return Ok(BTreeSet::new());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Overwrite the known-ID file with one identifier per line, sorted.
pub fn save_known_ids(path: &Path, ids: &BTreeSet<String>) -> Result<()> {
    ensure_parent(path)?;
    let content: String = ids.iter().map(|id| format!("{id}\n")).collect();
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Create parent directories for `path` if needed.
fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for {}", path.display()))?;
        }
    }
    Ok(())
}
