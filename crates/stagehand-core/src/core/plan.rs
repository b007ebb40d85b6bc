//! Placement planning.
//!
//! Evaluates the rule table against a scanned build-output tree and produces
//! an ordered, conflict-checked [`PlacementPlan`]. Planning never touches
//! the filesystem; `io::stage` executes the result. A plan that fails here
//! aborts packaging before any copy runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glob::Pattern;
use serde::Serialize;
use thiserror::Error;

use crate::core::platform::BuildConfig;
use crate::core::rules::{PlacementRule, SourceRoot, rule_table};
use crate::core::tree::{ArtifactKind, BuildOutputTree};
use crate::types::PackageName;

/// Planning failure. No partial plan survives any of these.
#[derive(Error, Debug)]
pub enum PlanError {
    /// Two distinct source files resolved to the same destination.
    #[error(
        "placement conflict: '{}' and '{}' both map to '{}'",
        .first.display(),
        .second.display(),
        .dest.display()
    )]
    Conflict {
        /// Contested destination, relative to the package root.
        dest: PathBuf,
        /// Source that claimed the destination first.
        first: PathBuf,
        /// Source that collided with it.
        second: PathBuf,
    },

    /// The release-build output subdirectory was absent at scan time.
    #[error("release output directory '{}' not found; run the build first", .0.display())]
    MissingOutputTree(PathBuf),

    /// A rule pattern failed to compile (a package name can carry glob
    /// metacharacters into the import-stub pattern).
    #[error("invalid placement pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// One planned copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    /// Source path, relative to the tree root.
    pub source: PathBuf,
    /// Destination path, relative to the package root.
    pub dest: PathBuf,
    /// Category of the file being placed.
    pub kind: ArtifactKind,
}

/// Ordered, conflict-free set of placements for one package operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlacementPlan {
    placements: Vec<Placement>,
}

impl PlacementPlan {
    /// All placements, in rule order then path order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Number of planned copies.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether the plan places anything at all.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Placements of a given category.
    pub fn of_kind(&self, kind: ArtifactKind) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(move |p| p.kind == kind)
    }

    /// Header placements (the path-preserved `include/` subtree).
    pub fn headers(&self) -> impl Iterator<Item = &Placement> {
        self.of_kind(ArtifactKind::Header)
    }
}

/// Compute the placement plan for one packaging invocation.
///
/// Stateless transform from `(tree, config, name)` to a plan; calling it
/// twice on the same inputs yields identical plans. Patterns that match
/// nothing are no-ops. Two distinct sources mapping to one destination are
/// fatal before anything is copied.
pub fn plan(
    tree: &BuildOutputTree,
    config: &BuildConfig,
    name: &PackageName,
) -> Result<PlacementPlan, PlanError> {
    if !tree.release_present() {
        return Err(PlanError::MissingOutputTree(
            tree.release_subdir().to_path_buf(),
        ));
    }

    let rules = rule_table(config, name);
    let mut placements = Vec::new();
    // dest -> first source to claim it
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();

    for rule in &rules {
        let pattern = Pattern::new(&rule.pattern)?;
        for file in tree.files() {
            let Some(anchored) = anchor(&file.rel, rule, tree) else {
                continue;
            };
            if !pattern.matches_path(anchored) {
                continue;
            }
            let Some(dest) = destination(rule, anchored) else {
                continue;
            };
            match claimed.get(&dest) {
                // The same source matched by overlapping rules: cumulative
                // copy semantics, not a conflict.
                Some(prev) if *prev == file.rel => {}
                Some(prev) => {
                    return Err(PlanError::Conflict {
                        dest,
                        first: prev.clone(),
                        second: file.rel.clone(),
                    });
                }
                None => {
                    claimed.insert(dest.clone(), file.rel.clone());
                    placements.push(Placement {
                        source: file.rel.clone(),
                        dest,
                        kind: file.kind,
                    });
                }
            }
        }
    }

    tracing::debug!(
        "planned {} placements from {} files",
        placements.len(),
        tree.files().len()
    );

    Ok(PlacementPlan { placements })
}

/// Rebase `rel` onto the rule's anchor. `None` when the file is outside the
/// anchor subtree.
fn anchor<'a>(rel: &'a Path, rule: &PlacementRule, tree: &BuildOutputTree) -> Option<&'a Path> {
    match rule.source {
        SourceRoot::Tree => Some(rel),
        SourceRoot::Release => rel.strip_prefix(tree.release_subdir()).ok(),
    }
}

/// Destination path for a matched file, relative to the package root.
fn destination(rule: &PlacementRule, anchored: &Path) -> Option<PathBuf> {
    let root = Path::new(rule.dest.as_str());
    if rule.keep_path {
        Some(root.join(anchored))
    } else {
        anchored.file_name().map(|name| root.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::{LinkMode, TargetOs};
    use crate::core::tree::TreeFile;

    fn tree(files: &[&str]) -> BuildOutputTree {
        BuildOutputTree::new(
            "/build",
            "out/rel",
            true,
            files.iter().map(|f| TreeFile::new(*f)).collect(),
        )
    }

    fn config(os: TargetOs, link_mode: LinkMode) -> BuildConfig {
        BuildConfig::new(os, link_mode, true)
    }

    fn name() -> PackageName {
        PackageName::new("tst")
    }

    fn dests(plan: &PlacementPlan) -> Vec<String> {
        plan.placements()
            .iter()
            .map(|p| p.dest.display().to_string())
            .collect()
    }

    #[test]
    fn test_headers_preserve_paths() {
        let tree = tree(&["foo/bar.h", "foo/baz.hpp"]);
        let plan = plan(&tree, &config(TargetOs::Linux, LinkMode::Static), &name()).unwrap();
        let headers: Vec<_> = plan
            .headers()
            .map(|p| p.dest.display().to_string())
            .collect();
        assert_eq!(headers, vec!["include/foo/bar.h", "include/foo/baz.hpp"]);
    }

    #[test]
    fn test_shared_linux_flattens_so_files() {
        let tree = tree(&["out/rel/libtst.so", "out/rel/libtst.so.2"]);
        let plan = plan(&tree, &config(TargetOs::Linux, LinkMode::Shared), &name()).unwrap();
        assert_eq!(dests(&plan), vec!["lib/libtst.so", "lib/libtst.so.2"]);
    }

    #[test]
    fn test_static_linux_collects_archive_only() {
        let tree = tree(&["out/rel/libtst.a", "out/rel/libtst.so"]);
        let plan = plan(&tree, &config(TargetOs::Linux, LinkMode::Static), &name()).unwrap();
        assert_eq!(dests(&plan), vec!["lib/libtst.a"]);
        assert!(!dests(&plan).iter().any(|d| d.starts_with("bin/")));
    }

    #[test]
    fn test_windows_shared_splits_stub_and_runtime() {
        let tree = tree(&["out/rel/tst.lib", "out/rel/tst.dll"]);
        let plan = plan(&tree, &config(TargetOs::Windows, LinkMode::Shared), &name()).unwrap();
        assert_eq!(dests(&plan), vec!["lib/tst.lib", "bin/tst.dll"]);
    }

    #[test]
    fn test_conflict_is_fatal() {
        // Distinct sources, both flattened onto lib/libtst.so.
        let tree = tree(&["out/rel/a/libtst.so", "out/rel/b/libtst.so"]);
        let err = plan(&tree, &config(TargetOs::Linux, LinkMode::Shared), &name()).unwrap_err();
        match err {
            PlanError::Conflict { dest, .. } => {
                assert_eq!(dest, PathBuf::from("lib/libtst.so"));
            }
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_match_patterns_are_noops() {
        // A Linux tree has no .dylib or .dll; those rules simply do nothing.
        let tree = tree(&["src/tst.h", "out/rel/libtst.so"]);
        let plan = plan(&tree, &config(TargetOs::Linux, LinkMode::Shared), &name()).unwrap();
        assert_eq!(dests(&plan), vec!["include/src/tst.h", "lib/libtst.so"]);
    }

    #[test]
    fn test_missing_release_dir_is_fatal() {
        let tree = BuildOutputTree::new("/build", "out/rel", false, vec![TreeFile::new("a.h")]);
        let err = plan(&tree, &config(TargetOs::Linux, LinkMode::Static), &name()).unwrap_err();
        assert!(matches!(err, PlanError::MissingOutputTree(_)));
    }

    #[test]
    fn test_plan_is_idempotent() {
        let tree = tree(&["src/tst.hpp", "out/rel/libtst.a", "out/rel/tst.lib"]);
        let cfg = config(TargetOs::Windows, LinkMode::Static);
        let a = plan(&tree, &cfg, &name()).unwrap();
        let b = plan(&tree, &cfg, &name()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_so_patterns_do_not_cross_match() {
        let tree = tree(&["out/rel/libtst.so"]);
        let plan = plan(&tree, &config(TargetOs::Linux, LinkMode::Shared), &name()).unwrap();
        // Matched once by `*.so`, not again by `*.so.*`.
        assert_eq!(plan.len(), 1);
    }
}
