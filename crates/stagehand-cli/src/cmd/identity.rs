//! Identity command - resolve a version to its ABI cache key

use anyhow::Result;
use stagehand_core::{AbiPolicy, Version, resolve};

/// Print the cache key for `version` under `policy`.
pub fn run(version: &str, policy: AbiPolicy) -> Result<()> {
    let version: Version = version.parse()?;
    println!("{}", resolve(&version, policy));
    Ok(())
}
