//! ABI identity resolution
//!
//! Decides when two builds of a package are binary-compatible. The identity
//! is the cache key handed to the external package store: builds with equal
//! identities reuse each other, builds with different identities do not.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Version;

/// Which version components participate in the package identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbiPolicy {
    /// Exact match required: the full triple is the identity.
    Full,
    /// Patch releases are ABI-compatible: identity is `(major, minor)`.
    #[default]
    Minor,
    /// Minor releases are also compatible: identity is `(major)`.
    Major,
}

/// Error for unrecognized policy names.
#[derive(Error, Debug)]
#[error("unknown abi policy '{0}' (expected full, minor or major)")]
pub struct UnknownPolicy(String);

impl FromStr for AbiPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

/// Cache key for a built package.
///
/// Constructed only through [`resolve`], which upholds the invariant that a
/// retained minor implies nothing about patch but a retained patch requires
/// a retained minor. The [`fmt::Display`] form (`1`, `1.2` or `1.2.3`) is
/// the key consumed by the package store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageIdentity {
    major: u64,
    minor: Option<u64>,
    patch: Option<u64>,
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{minor}")?;
        }
        if let Some(patch) = self.patch {
            write!(f, ".{patch}")?;
        }
        Ok(())
    }
}

/// Compute the package identity of `version` under `policy`.
///
/// Pure; malformed version strings fail upstream during parsing.
pub fn resolve(version: &Version, policy: AbiPolicy) -> PackageIdentity {
    match policy {
        AbiPolicy::Full => PackageIdentity {
            major: version.major(),
            minor: Some(version.minor()),
            patch: Some(version.patch()),
        },
        AbiPolicy::Minor => PackageIdentity {
            major: version.major(),
            minor: Some(version.minor()),
            patch: None,
        },
        AbiPolicy::Major => PackageIdentity {
            major: version.major(),
            minor: None,
            patch: None,
        },
    }
}
