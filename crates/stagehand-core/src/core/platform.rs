//! Target platform and build configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Release-build output subdirectory, relative to the source tree root.
pub const DEFAULT_RELEASE_SUBDIR: &str = "out/rel";

/// Operating system a package is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    /// Windows (MSVC-style artifacts: `.lib` stubs, `.dll` runtimes).
    Windows,
    /// Linux (`.a`, `.so`).
    Linux,
    /// macOS (`.a`, `.dylib`).
    #[serde(rename = "macos")]
    MacOs,
}

impl TargetOs {
    /// The OS this tool is running on.
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::MacOs => "macos",
        };
        write!(f, "{s}")
    }
}

/// Error for unrecognized OS names.
#[derive(Error, Debug)]
#[error("unknown target os '{0}' (expected windows, linux or macos)")]
pub struct UnknownOs(String);

impl FromStr for TargetOs {
    type Err = UnknownOs;

    // Vendors spell macOS three ways; accept all of them.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" => Ok(Self::Windows),
            "linux" => Ok(Self::Linux),
            "macos" | "darwin" | "osx" => Ok(Self::MacOs),
            other => Err(UnknownOs(other.to_string())),
        }
    }
}

/// Static or shared library build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    /// Static archive (`.a`, `.lib`).
    #[default]
    Static,
    /// Shared library plus runtime artifacts (`.so`, `.dylib`, `.dll`).
    Shared,
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Static => "static",
            Self::Shared => "shared",
        };
        write!(f, "{s}")
    }
}

/// Immutable per-invocation build configuration.
///
/// Passed explicitly into planning; nothing here is ambient process state.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Target operating system.
    pub os: TargetOs,
    /// Static or shared build.
    pub link_mode: LinkMode,
    /// Position-independent code. `None` on Windows, where the option does
    /// not exist and is removed during normalization.
    pub fpic: Option<bool>,
    release_subdir: PathBuf,
}

impl BuildConfig {
    /// Build a configuration, normalizing the options for `os`.
    pub fn new(os: TargetOs, link_mode: LinkMode, fpic: bool) -> Self {
        let fpic = match os {
            TargetOs::Windows => None,
            _ => Some(fpic),
        };
        Self {
            os,
            link_mode,
            fpic,
            release_subdir: PathBuf::from(DEFAULT_RELEASE_SUBDIR),
        }
    }

    /// Override the release-build output subdirectory.
    pub fn with_release_subdir(mut self, subdir: impl Into<PathBuf>) -> Self {
        self.release_subdir = subdir.into();
        self
    }

    /// Release-build output subdirectory, relative to the tree root.
    pub fn release_subdir(&self) -> &Path {
        &self.release_subdir
    }
}
