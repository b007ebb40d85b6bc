//! Version parsing - plain release triples only
//!
//! Packages are versioned as `major.minor.patch`. Pre-release and build
//! metadata are rejected: the ABI identity (see `core::identity`) is defined
//! over release triples, and a key like `1.2` must never alias a pre-release.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A version string that does not parse as a plain `major.minor.patch`
/// release.
#[derive(Error, Debug)]
#[error("malformed version '{input}'")]
pub struct MalformedVersion {
    /// The rejected input.
    pub input: String,
    /// Parse failure detail. Absent when the string parsed but carried
    /// pre-release or build metadata.
    #[source]
    pub source: Option<semver::Error>,
}

/// A parsed semantic version triple. Immutable once parsed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
}

impl Version {
    /// Construct from raw components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Major component.
    pub fn major(&self) -> u64 {
        self.major
    }

    /// Minor component.
    pub fn minor(&self) -> u64 {
        self.minor
    }

    /// Patch component.
    pub fn patch(&self) -> u64 {
        self.patch
    }
}

impl FromStr for Version {
    type Err = MalformedVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = semver::Version::parse(s).map_err(|e| MalformedVersion {
            input: s.to_string(),
            source: Some(e),
        })?;
        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return Err(MalformedVersion {
                input: s.to_string(),
                source: None,
            });
        }
        Ok(Self::new(parsed.major, parsed.minor, parsed.patch))
    }
}

impl TryFrom<String> for Version {
    type Error = MalformedVersion;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Version> for String {
    fn from(v: Version) -> Self {
        v.to_string()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
