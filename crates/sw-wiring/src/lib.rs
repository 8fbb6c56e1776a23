//! sw-wiring: graph builders and the flow compiler.
//!
//! This crate ties the wiring graph to its two external signal domains:
//! the builders populate anchor nodes from the robot-IO and simulation
//! inventories, and the compiler turns the validated graph into the flat
//! flow program the simulation's tick loop executes.
//!
//! Compilation is a pure, synchronous, read-only walk. Any structural
//! violation (wrong function-node arity, an unresolved endpoint, ambiguous
//! fan-in into a non-aggregable target) fails the entire pass; there is no
//! partial program.

pub mod builder;
pub mod compiler;
pub mod error;
mod synth;

pub use builder::{build_default, refresh_robot_io};
pub use compiler::compile;
pub use error::{CompileError, CompileResult};
