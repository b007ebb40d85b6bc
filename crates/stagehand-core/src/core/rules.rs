//! Placement rule table.
//!
//! Packaging is defined declaratively: a fixed table of glob rules derived
//! from the link mode and package name, evaluated into a conflict-checked
//! plan by `core::plan`. Rules that match nothing are no-ops, so the table
//! can carry every platform's patterns at once - a Linux build simply never
//! produces a `.dylib` for the macOS rule to pick up.

use crate::core::platform::{BuildConfig, LinkMode};
use crate::types::PackageName;

/// Destination root inside the package directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestRoot {
    /// `include/` - headers.
    Include,
    /// `lib/` - link-time and non-Windows runtime libraries.
    Lib,
    /// `bin/` - Windows runtime libraries.
    Bin,
}

impl DestRoot {
    /// Directory name under the package root.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Lib => "lib",
            Self::Bin => "bin",
        }
    }
}

/// Where a rule's glob is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRoot {
    /// The whole build-output tree.
    Tree,
    /// The release-build output subdirectory.
    Release,
}

/// A single copy rule: glob pattern, anchor, destination, path handling.
#[derive(Debug, Clone)]
pub struct PlacementRule {
    /// Glob pattern matched against paths relative to the anchor. `*`
    /// crosses directory separators, so `*.h` matches recursively.
    pub pattern: String,
    /// Anchor the pattern is evaluated from.
    pub source: SourceRoot,
    /// Destination root for matched files.
    pub dest: DestRoot,
    /// Preserve the relative directory structure, or flatten to the
    /// filename.
    pub keep_path: bool,
}

impl PlacementRule {
    fn new(pattern: impl Into<String>, source: SourceRoot, dest: DestRoot, keep_path: bool) -> Self {
        Self {
            pattern: pattern.into(),
            source,
            dest,
            keep_path,
        }
    }
}

/// Build the rule table for one packaging invocation.
pub fn rule_table(config: &BuildConfig, name: &PackageName) -> Vec<PlacementRule> {
    let mut rules = vec![
        PlacementRule::new("*.h", SourceRoot::Tree, DestRoot::Include, true),
        PlacementRule::new("*.hpp", SourceRoot::Tree, DestRoot::Include, true),
        // MSVC link stub; lands next to the project file, not under the
        // release subdirectory. Zero matches off Windows.
        PlacementRule::new(format!("*{name}.lib"), SourceRoot::Tree, DestRoot::Lib, false),
    ];

    match config.link_mode {
        LinkMode::Shared => {
            rules.push(PlacementRule::new(
                "*.dll",
                SourceRoot::Release,
                DestRoot::Bin,
                false,
            ));
            rules.push(PlacementRule::new(
                "*.so",
                SourceRoot::Release,
                DestRoot::Lib,
                false,
            ));
            rules.push(PlacementRule::new(
                "*.so.*",
                SourceRoot::Release,
                DestRoot::Lib,
                false,
            ));
            rules.push(PlacementRule::new(
                "*.dylib",
                SourceRoot::Release,
                DestRoot::Lib,
                false,
            ));
        }
        LinkMode::Static => {
            rules.push(PlacementRule::new(
                "*.a",
                SourceRoot::Release,
                DestRoot::Lib,
                false,
            ));
        }
    }

    rules
}
