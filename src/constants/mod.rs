//! Tuning constants, one submodule per concern.

mod agent;
mod dungeon;
mod spawning;

pub use agent::*;
pub use dungeon::*;
pub use spawning::*;
