//! Build orchestration
//!
//! Runs the recipe's make targets in the source tree. The build tool itself
//! is external; this only drives it and reports failure.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

/// Runs the build tool for a recipe checkout.
#[derive(Debug)]
pub struct Builder<'a> {
    source: &'a Path,
}

impl<'a> Builder<'a> {
    /// Create a builder rooted at the source directory.
    pub fn new(source: &'a Path) -> Self {
        Self { source }
    }

    /// Run `make` (and the test target) in the source directory.
    pub fn build(&self, run_tests: bool) -> Result<()> {
        self.make(&["lint=off"])?;
        if run_tests {
            self.make(&["lint=off", "test"])?;
        }
        Ok(())
    }

    fn make(&self, args: &[&str]) -> Result<()> {
        tracing::debug!("running make {args:?} in '{}'", self.source.display());
        let status = Command::new("make")
            .args(args)
            .current_dir(self.source)
            .status()
            .context("Failed to execute make")?;

        if !status.success() {
            anyhow::bail!("make failed with exit code: {:?}", status.code());
        }
        Ok(())
    }
}
