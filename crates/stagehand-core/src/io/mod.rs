//! Filesystem boundary: tree scanning and plan execution

pub mod scan;
pub mod stage;

pub use scan::scan;
pub use stage::{PackageInfo, stage, write_info};
