//! Package command - stage a build and compute its cache key

use std::path::Path;

use anyhow::{Context, Result};
use stagehand_core::io::PackageInfo;
use stagehand_core::{Recipe, TargetOs, io, resolve};

/// Scan, plan, stage into `dest`, write metadata, print the identity key.
pub fn run(
    recipe: &Path,
    source: &Path,
    dest: &Path,
    os: Option<TargetOs>,
    shared: bool,
) -> Result<()> {
    let recipe = Recipe::load(recipe).context("Failed to load recipe")?;
    let os = os.unwrap_or_else(TargetOs::host);
    let config = recipe.build_config(os, shared);

    let tree = io::scan(source, config.release_subdir())?;
    // Planning rejects conflicting destinations before anything is copied.
    let plan = stagehand_core::plan(&tree, &config, &recipe.name)?;
    let placed = io::stage(&plan, tree.root(), dest)?;

    let identity = resolve(&recipe.version, recipe.abi_policy);
    let info = PackageInfo {
        name: recipe.name.clone(),
        version: recipe.version,
        identity: identity.to_string(),
        link_mode: config.link_mode,
        libs: vec![recipe.name.to_string()],
    };
    io::write_info(dest, &info)?;

    println!("Staged {placed} files into '{}'", dest.display());
    println!("Package identity: {identity}");
    Ok(())
}
