//! Check command - validate a recipe file

use std::path::Path;

use anyhow::{Context, Result};
use stagehand_core::{Recipe, resolve};

/// Parse a recipe and print a summary.
pub fn run(path: &Path) -> Result<()> {
    let recipe = Recipe::load(path).context("Failed to parse recipe")?;

    println!("Recipe is valid");
    println!("  Name: {}", recipe.name);
    println!("  Version: {}", recipe.version);
    println!(
        "  Identity: {} ({:?} policy)",
        resolve(&recipe.version, recipe.abi_policy),
        recipe.abi_policy
    );
    if !recipe.license.is_empty() {
        println!("  License: {}", recipe.license);
    }
    for req in &recipe.requires {
        println!("  Requires: {} {}", req.name, req.range);
    }
    Ok(())
}
