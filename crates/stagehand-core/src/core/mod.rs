//! Core planning logic

pub mod builder;
pub mod identity;
pub mod plan;
pub mod platform;
pub mod recipe;
pub mod rules;
pub mod tree;
