//! Plan execution.
//!
//! Copies placements into the package directory and writes the
//! consumer-facing metadata file. All failure here is copy-time I/O,
//! surfaced with the offending path; planning has already rejected
//! conflicting destinations, so nothing is ever silently overwritten.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::plan::PlacementPlan;
use crate::core::platform::LinkMode;
use crate::types::{PackageName, Version};

/// Execute a plan: copy every placement from `tree_root` into
/// `package_root`, creating destination directories as needed.
///
/// No rollback on failure; copies are idempotent, so re-running after the
/// cause is fixed is safe. Returns the number of files placed.
pub fn stage(plan: &PlacementPlan, tree_root: &Path, package_root: &Path) -> Result<usize> {
    for placement in plan.placements() {
        let src = tree_root.join(&placement.source);
        let dst = package_root.join(&placement.dest);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create '{}'", parent.display()))?;
        }
        fs::copy(&src, &dst)
            .with_context(|| format!("Failed to copy '{}' to '{}'", src.display(), dst.display()))?;
        tracing::debug!(
            "staged {} -> {}",
            placement.source.display(),
            placement.dest.display()
        );
    }
    Ok(plan.len())
}

/// Consumer-facing link metadata written next to the staged trees.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PackageInfo {
    /// Package name.
    pub name: PackageName,
    /// Package version.
    pub version: Version,
    /// Resolved ABI cache key.
    pub identity: String,
    /// Link mode the package was built with.
    pub link_mode: LinkMode,
    /// Library names consumers link against.
    pub libs: Vec<String>,
}

/// Write `pkginfo.toml` into the package root.
pub fn write_info(package_root: &Path, info: &PackageInfo) -> Result<()> {
    fs::create_dir_all(package_root)
        .with_context(|| format!("Failed to create '{}'", package_root.display()))?;
    let content = toml::to_string_pretty(info)?;
    let path = package_root.join("pkginfo.toml");
    fs::write(&path, content).with_context(|| format!("Failed to write '{}'", path.display()))?;
    Ok(())
}
