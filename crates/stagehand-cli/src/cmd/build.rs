//! Build command - drive the recipe's make targets

use std::path::Path;

use anyhow::{Context, Result};
use stagehand_core::Recipe;
use stagehand_core::core::builder::Builder;

/// Run the recipe's build (and test) commands in `source`.
pub fn run(recipe: &Path, source: &Path, no_test: bool) -> Result<()> {
    let recipe = Recipe::load(recipe).context("Failed to load recipe")?;
    let run_tests = recipe.run_tests && !no_test;

    Builder::new(source).build(run_tests)?;

    println!("Built {} {}", recipe.name, recipe.version);
    Ok(())
}
