//! stagehand-core - staging build outputs into package trees
//!
//! Turns the build output of a C/C++ library into a relocatable package
//! directory and computes the ABI cache key for the result.
//!
//! # Architecture
//!
//! - **Decision/effect split**: [`plan()`](plan) evaluates a declarative
//!   rule table against a scanned tree and produces a conflict-checked
//!   [`PlacementPlan`] without touching the filesystem. [`io::stage`]
//!   executes the plan. Planning failures therefore abort before any copy
//!   runs.
//! - **Explicit configuration**: the `shared`/`fpic` options live in an
//!   immutable [`BuildConfig`] passed into planning, never in ambient state.
//! - **Versioned recipes**: two recipe generations exist on disk; the loader
//!   normalizes the legacy form through a shim so everything downstream sees
//!   one [`Recipe`].
//!
//! # Package layout
//!
//! ```text
//! <package>/
//! ├── include/      # headers, directory structure preserved
//! ├── lib/          # static archives, import stubs, .so/.dylib runtime libs
//! ├── bin/          # .dll runtime libs
//! └── pkginfo.toml  # consumer-facing link metadata
//! ```

pub mod core;
pub mod io;
pub mod types;

// Re-exports for convenience
pub use crate::core::identity::{AbiPolicy, PackageIdentity, resolve};
pub use crate::core::plan::{PlacementPlan, PlanError, plan};
pub use crate::core::platform::{BuildConfig, LinkMode, TargetOs};
pub use crate::core::recipe::{Recipe, RecipeError};
pub use crate::core::tree::{ArtifactKind, BuildOutputTree, TreeFile};
pub use crate::types::{MalformedVersion, PackageName, Version};
