//! Robot-IO boundary for simwire.
//!
//! The wiring graph's robot side is populated from an inventory of emulated
//! robot-code I/O devices. This crate defines the closed device taxonomy,
//! the backend trait the graph builders and compiler resolve endpoints
//! through, and an in-memory emulated device bank used by tests and the CLI.

pub mod backend;
pub mod category;
pub mod emulated;

pub use backend::RobotIoBackend;
pub use category::{DeviceCategory, DeviceDescriptor};
pub use emulated::EmulatedRio;
