//! Build-output tree model.
//!
//! A [`BuildOutputTree`] is an in-memory snapshot of a build directory:
//! every file as a relative path plus a category inferred from its name.
//! Scanning lives in `io::scan`; tests construct trees directly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Category of a build-output file, inferred from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// C/C++ header (`.h`, `.hpp`).
    Header,
    /// Static archive (`.a`).
    StaticLib,
    /// MSVC `.lib` - static archive or import stub for a DLL.
    LinkLib,
    /// Shared library (`.so`, versioned `.so.*`, `.dylib`).
    SharedLib,
    /// Dynamic runtime library (`.dll`).
    RuntimeLib,
    /// Anything else (objects, depfiles, binaries).
    Other,
}

impl ArtifactKind {
    /// Classify a file by its name.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_lowercase();

        if name.ends_with(".h") || name.ends_with(".hpp") {
            Self::Header
        } else if name.ends_with(".a") {
            Self::StaticLib
        } else if name.ends_with(".lib") {
            Self::LinkLib
        } else if name.ends_with(".dll") {
            Self::RuntimeLib
        } else if name.ends_with(".so") || name.contains(".so.") || name.ends_with(".dylib") {
            Self::SharedLib
        } else {
            Self::Other
        }
    }
}

/// One file in a scanned build-output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeFile {
    /// Path relative to the tree root.
    pub rel: PathBuf,
    /// Inferred category.
    pub kind: ArtifactKind,
}

impl TreeFile {
    /// Build an entry from a relative path, inferring its category.
    pub fn new(rel: impl Into<PathBuf>) -> Self {
        let rel = rel.into();
        let kind = ArtifactKind::from_path(&rel);
        Self { rel, kind }
    }
}

/// Snapshot of a build-output directory.
#[derive(Debug, Clone)]
pub struct BuildOutputTree {
    root: PathBuf,
    release_subdir: PathBuf,
    release_present: bool,
    files: Vec<TreeFile>,
}

impl BuildOutputTree {
    /// Assemble a snapshot. Files are sorted so plans come out identical
    /// regardless of traversal order.
    pub fn new(
        root: impl Into<PathBuf>,
        release_subdir: impl Into<PathBuf>,
        release_present: bool,
        mut files: Vec<TreeFile>,
    ) -> Self {
        files.sort_by(|a, b| a.rel.cmp(&b.rel));
        Self {
            root: root.into(),
            release_subdir: release_subdir.into(),
            release_present,
            files,
        }
    }

    /// Directory the snapshot was taken from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Release-build output subdirectory, relative to the root.
    pub fn release_subdir(&self) -> &Path {
        &self.release_subdir
    }

    /// Whether the release subdirectory existed at scan time.
    pub fn release_present(&self) -> bool {
        self.release_present
    }

    /// All files, sorted by relative path.
    pub fn files(&self) -> &[TreeFile] {
        &self.files
    }
}
