use super::types::{Snapshot, SNAPSHOT_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::Path;

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Load a snapshot from a YAML or JSON file (JSON when the extension is `.json`).
///
/// Fails if the file is missing, cannot be parsed, or has an unsupported version.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot at {}", path.display()))?;

    let snapshot: Snapshot = if is_json(path) {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse snapshot: invalid JSON in {}", path.display()))?
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse snapshot: invalid YAML in {}", path.display()))?
    };

    if snapshot.version != SNAPSHOT_VERSION {
        anyhow::bail!("Unsupported snapshot version: {}", snapshot.version);
    }

    Ok(snapshot)
}

/// Save a snapshot atomically; the format follows the file extension.
pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let content = if is_json(path) {
        serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?
    } else {
        serde_saphyr::to_string(snapshot).context("Failed to serialize snapshot")?
    };

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
    file.commit().context("Failed to save snapshot")?;

    Ok(())
}
