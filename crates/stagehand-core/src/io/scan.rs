//! Build-output tree scanning.

use std::path::Path;

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::core::tree::{BuildOutputTree, TreeFile};

/// Scan `root` into an in-memory tree snapshot.
///
/// Read-only; the snapshot is what planning runs against. Records whether
/// `release_subdir` exists so the planner can reject unbuilt trees.
pub fn scan(root: &Path, release_subdir: &Path) -> Result<BuildOutputTree> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("Failed to walk '{}'", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(root)
            .with_context(|| format!("Walked outside of '{}'", root.display()))?
            .to_path_buf();
        files.push(TreeFile::new(rel));
    }

    let release_present = root.join(release_subdir).is_dir();
    tracing::debug!(
        "scanned {} files under '{}' (release dir present: {release_present})",
        files.len(),
        root.display()
    );

    Ok(BuildOutputTree::new(
        root,
        release_subdir,
        release_present,
        files,
    ))
}
