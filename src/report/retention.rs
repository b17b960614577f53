//! Local report retention

use anyhow::Context;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

/// Delete `.csv` files in `dir` last modified longer ago than `retention`.
///
/// Returns the number of files removed. A missing directory is not an error.
pub fn cleanup_old_reports(dir: &Path, retention: Duration) -> anyhow::Result<usize> {
    if !dir.exists() {
        tracing::debug!(dir = %dir.display(), "Report directory missing, nothing to clean");
        return Ok(0);
    }

    let cutoff = SystemTime::now()
        .checked_sub(retention)
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let mut removed = 0;
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }

        let modified = fs::metadata(&path)?.modified()?;
        if modified < cutoff {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
            tracing::info!(path = %path.display(), "Removed old report");
            removed += 1;
        }
    }

    tracing::info!(dir = %dir.display(), removed, "Report cleanup complete");
    Ok(removed)
}
