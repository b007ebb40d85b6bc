//! Subcommand implementations

pub mod build;
pub mod check;
pub mod identity;
pub mod package;
pub mod plan;
