//! Recipe files.
//!
//! A recipe describes the packaged library: metadata, option defaults, ABI
//! policy and dependency requirements. Two on-disk generations exist (the
//! format migrated package-manager API generations); the loader detects the
//! generation and normalizes the legacy form through a shim, so everything
//! downstream sees a single [`Recipe`].

use std::fs;
use std::path::{Path, PathBuf};

use semver::VersionReq;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::identity::AbiPolicy;
use crate::core::platform::{BuildConfig, DEFAULT_RELEASE_SUBDIR, LinkMode, TargetOs};
use crate::types::{MalformedVersion, PackageName, Version};

/// Errors raised while loading a recipe.
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Recipe file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Recipe file is not valid TOML for either generation.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Recipe declares a generation this tool does not understand.
    #[error("unsupported recipe schema {0}; this tool understands generations 1 and 2")]
    Schema(u32),

    /// Recipe declares an empty package name.
    #[error("recipe has an empty package name")]
    EmptyName,

    /// Legacy requirement string is not of the form `name/range`.
    #[error("malformed requirement '{0}': expected 'name/range'")]
    Requirement(String),

    /// Requirement range does not parse.
    #[error("invalid version range '{range}': {source}")]
    Range {
        /// The rejected range string.
        range: String,
        /// Underlying parse failure.
        source: semver::Error,
    },

    /// Package version does not parse.
    #[error(transparent)]
    Version(#[from] MalformedVersion),
}

/// Default build-time options declared by a recipe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OptionDefaults {
    /// Build the shared-library configuration by default.
    pub shared: bool,
    /// Position-independent code by default. Ignored on Windows.
    pub fpic: bool,
}

impl Default for OptionDefaults {
    fn default() -> Self {
        Self {
            shared: false,
            fpic: true,
        }
    }
}

/// One dependency requirement.
#[derive(Debug, Clone)]
pub struct Requirement {
    /// Dependency package name.
    pub name: PackageName,
    /// Accepted version range.
    pub range: VersionReq,
    /// Whether the dependency's headers leak through this package's own.
    pub transitive_headers: bool,
}

/// A fully-parsed recipe. Both on-disk generations normalize to this.
#[derive(Debug, Clone)]
pub struct Recipe {
    /// Package name.
    pub name: PackageName,
    /// Package version.
    pub version: Version,
    /// SPDX license expression.
    pub license: String,
    /// One-line description.
    pub description: String,
    /// Project homepage.
    pub homepage: String,
    /// Build-time option defaults.
    pub options: OptionDefaults,
    /// ABI compatibility policy for the package identity.
    pub abi_policy: AbiPolicy,
    /// Dependency requirements.
    pub requires: Vec<Requirement>,
    /// Release-build output subdirectory, relative to the source tree.
    pub release_subdir: PathBuf,
    /// Run the test target during `build`.
    pub run_tests: bool,
}

impl Recipe {
    /// Load and normalize a recipe file.
    pub fn load(path: &Path) -> Result<Self, RecipeError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and normalize recipe text.
    pub fn parse(content: &str) -> Result<Self, RecipeError> {
        let doc: RecipeDoc = toml::from_str(content)?;
        doc.normalize()
    }

    /// Merge the recipe's option defaults with a per-invocation override
    /// into an explicit build configuration.
    pub fn build_config(&self, os: TargetOs, shared: bool) -> BuildConfig {
        let link_mode = if shared || self.options.shared {
            LinkMode::Shared
        } else {
            LinkMode::Static
        };
        BuildConfig::new(os, link_mode, self.options.fpic)
            .with_release_subdir(&self.release_subdir)
    }
}

fn default_schema() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_release_subdir() -> String {
    DEFAULT_RELEASE_SUBDIR.to_string()
}

#[derive(Debug, Deserialize)]
struct RecipeDoc {
    // Legacy files predate the field, so its absence means generation 1.
    #[serde(default = "default_schema")]
    schema: u32,
    package: PackageDoc,
    #[serde(default)]
    abi: AbiDoc,
    #[serde(default)]
    requires: Vec<RequireDoc>,
    #[serde(default)]
    build: BuildDoc,
}

#[derive(Debug, Deserialize)]
struct PackageDoc {
    name: String,
    version: String,
    #[serde(default)]
    license: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    homepage: String,
    #[serde(default)]
    options: OptionDefaults,
}

#[derive(Debug, Default, Deserialize)]
struct AbiDoc {
    #[serde(default)]
    policy: AbiPolicy,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequireDoc {
    // Current generation: [[requires]] tables.
    Entry {
        name: String,
        range: String,
        #[serde(default, rename = "transitive-headers")]
        transitive_headers: bool,
    },
    // Legacy generation: requires = ["name/range"].
    Legacy(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct BuildDoc {
    #[serde(default = "default_release_subdir")]
    release_subdir: String,
    #[serde(default = "default_true")]
    test: bool,
}

impl Default for BuildDoc {
    fn default() -> Self {
        Self {
            release_subdir: default_release_subdir(),
            test: true,
        }
    }
}

impl RecipeDoc {
    fn normalize(self) -> Result<Recipe, RecipeError> {
        match self.schema {
            1 => tracing::debug!("legacy recipe generation; normalizing"),
            2 => {}
            other => return Err(RecipeError::Schema(other)),
        }
        if self.package.name.is_empty() {
            return Err(RecipeError::EmptyName);
        }

        let version: Version = self.package.version.parse()?;
        let requires = self
            .requires
            .into_iter()
            .map(RequireDoc::normalize)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Recipe {
            name: PackageName::new(&self.package.name),
            version,
            license: self.package.license,
            description: self.package.description,
            homepage: self.package.homepage,
            options: self.package.options,
            abi_policy: self.abi.policy,
            requires,
            release_subdir: PathBuf::from(self.build.release_subdir),
            run_tests: self.build.test,
        })
    }
}

impl RequireDoc {
    fn normalize(self) -> Result<Requirement, RecipeError> {
        match self {
            Self::Entry {
                name,
                range,
                transitive_headers,
            } => Ok(Requirement {
                name: PackageName::new(&name),
                range: parse_range(&range)?,
                transitive_headers,
            }),
            Self::Legacy(spec) => {
                let Some((name, range)) = spec.split_once('/') else {
                    return Err(RecipeError::Requirement(spec));
                };
                if name.is_empty() || range.is_empty() {
                    return Err(RecipeError::Requirement(spec.clone()));
                }
                // The legacy generation had no per-requirement flags; headers
                // were always transitive.
                Ok(Requirement {
                    name: PackageName::new(name),
                    range: parse_range(range)?,
                    transitive_headers: true,
                })
            }
        }
    }
}

fn parse_range(range: &str) -> Result<VersionReq, RecipeError> {
    VersionReq::parse(range).map_err(|source| RecipeError::Range {
        range: range.to_string(),
        source,
    })
}
