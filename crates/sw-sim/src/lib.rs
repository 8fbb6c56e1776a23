//! sw-sim: the simulation-side boundary of the wiring core.
//!
//! Provides:
//! - The `SimulationLayer` trait through which physics-side drivers
//!   (command consumers) and stimuli (measurement producers) are looked up
//! - `Flow` and the per-tick executor that moves every compiled value once
//!   per simulation step
//! - `FlowBank`, the active-program holder with keep-stale-on-failure swaps
//! - `LoopbackSim`, an in-memory simulation layer for tests and demos

pub mod flow;
pub mod layer;
pub mod loopback;

pub use flow::{Flow, FlowBank, run_tick};
pub use layer::{DriverInfo, SimulationLayer, StimulusInfo};
pub use loopback::LoopbackSim;
