//! Plan command - dry-run placement planning

use std::path::Path;

use anyhow::{Context, Result};
use stagehand_core::{ArtifactKind, LinkMode, Recipe, TargetOs, io};

/// Compute and print the placement plan without copying anything.
pub fn run(recipe: &Path, source: &Path, os: Option<TargetOs>, shared: bool, json: bool) -> Result<()> {
    let recipe = Recipe::load(recipe).context("Failed to load recipe")?;
    let os = os.unwrap_or_else(TargetOs::host);
    let config = recipe.build_config(os, shared);

    let tree = io::scan(source, config.release_subdir())?;
    let plan = stagehand_core::plan(&tree, &config, &recipe.name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    for placement in plan.placements() {
        println!(
            "{} -> {}",
            placement.source.display(),
            placement.dest.display()
        );
    }
    println!(
        "{} placements ({} headers, {} libraries) for {} {} [{}]",
        plan.len(),
        plan.headers().count(),
        plan.len() - plan.headers().count(),
        recipe.name,
        recipe.version,
        config.link_mode,
    );
    if os == TargetOs::Windows
        && config.link_mode == LinkMode::Shared
        && plan.of_kind(ArtifactKind::RuntimeLib).count() == 0
    {
        println!("note: no .dll collected from this tree");
    }
    Ok(())
}
