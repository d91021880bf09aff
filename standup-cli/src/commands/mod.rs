//! Subcommand implementations

pub mod serve;
pub mod spin;
pub mod twists;
