//! Subcommand implementations.

pub mod completion;
pub mod move_tree;
