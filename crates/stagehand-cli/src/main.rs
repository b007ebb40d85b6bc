//! stagehand - stage build outputs into package trees

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stagehand_core::{AbiPolicy, TargetOs};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "stagehand")]
#[command(author, version, about = "stagehand - stage build outputs into package trees")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the placement plan for a build without copying anything
    Plan {
        /// Recipe file
        #[arg(long, default_value = "recipe.toml")]
        recipe: PathBuf,
        /// Build output directory to scan
        #[arg(long)]
        source: PathBuf,
        /// Target OS (defaults to the host)
        #[arg(long)]
        os: Option<TargetOs>,
        /// Plan the shared-library configuration
        #[arg(long)]
        shared: bool,
        /// Emit the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Stage a build into a package directory and print its cache key
    Package {
        /// Recipe file
        #[arg(long, default_value = "recipe.toml")]
        recipe: PathBuf,
        /// Build output directory to scan
        #[arg(long)]
        source: PathBuf,
        /// Package directory to create
        #[arg(long)]
        dest: PathBuf,
        /// Target OS (defaults to the host)
        #[arg(long)]
        os: Option<TargetOs>,
        /// Stage the shared-library configuration
        #[arg(long)]
        shared: bool,
    },
    /// Run the recipe's build commands
    Build {
        /// Recipe file
        #[arg(long, default_value = "recipe.toml")]
        recipe: PathBuf,
        /// Source directory to build in
        #[arg(long)]
        source: PathBuf,
        /// Skip the test target
        #[arg(long)]
        no_test: bool,
    },
    /// Print the ABI cache key for a version
    Identity {
        /// Version to resolve (major.minor.patch)
        version: String,
        /// ABI policy
        #[arg(long, default_value = "minor")]
        policy: AbiPolicy,
    },
    /// Validate a recipe file
    Check {
        /// Recipe file
        #[arg(default_value = "recipe.toml")]
        recipe: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            recipe,
            source,
            os,
            shared,
            json,
        } => cmd::plan::run(&recipe, &source, os, shared, json),
        Commands::Package {
            recipe,
            source,
            dest,
            os,
            shared,
        } => cmd::package::run(&recipe, &source, &dest, os, shared),
        Commands::Build {
            recipe,
            source,
            no_test,
        } => cmd::build::run(&recipe, &source, no_test),
        Commands::Identity { version, policy } => cmd::identity::run(&version, policy),
        Commands::Check { recipe } => cmd::check::run(&recipe),
    }
}
