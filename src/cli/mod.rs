//! CLI layer
//!
//! Terminal presentation for the cherry-pick workflow: colored output,
//! dialoguer prompts and the command driver.

pub mod commands;
pub mod output;
pub mod prompt;

pub use output::Output;
