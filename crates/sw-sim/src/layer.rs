//! Lookup seam for physics-side actuators and sensors.

use sw_core::{ReceiverRef, SupplierRef, ValueKind};

/// One physics-side actuator reported by the simulation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverInfo {
    /// Stable identifier, e.g. `drivetrain/left`.
    pub origin_id: String,
    pub kind: ValueKind,
}

impl DriverInfo {
    pub fn new(origin_id: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            origin_id: origin_id.into(),
            kind,
        }
    }
}

/// One physics-side sensor reported by the simulation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StimulusInfo {
    /// Stable identifier, e.g. `drivetrain/left_encoder`.
    pub origin_id: String,
    pub kind: ValueKind,
}

impl StimulusInfo {
    pub fn new(origin_id: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            origin_id: origin_id.into(),
            kind,
        }
    }
}

/// Physics-side endpoint lookup.
///
/// Drivers consume commands compiled out of the wiring graph; stimuli
/// produce the measurements the graph feeds back into robot-IO devices.
pub trait SimulationLayer {
    /// Current driver inventory, in a stable listing order.
    fn drivers(&self) -> Vec<DriverInfo>;

    /// Current stimulus inventory, in a stable listing order.
    fn stimuli(&self) -> Vec<StimulusInfo>;

    /// Write endpoint of the named driver.
    fn driver(&self, origin_id: &str) -> Option<ReceiverRef>;

    /// Read endpoint of the named stimulus.
    fn stimulus(&self, origin_id: &str) -> Option<SupplierRef>;
}
