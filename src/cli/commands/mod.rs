//! CLI command implementations

pub mod pick;

pub use pick::{run_pick, PickOptions};
