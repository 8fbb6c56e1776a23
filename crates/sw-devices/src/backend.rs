//! The trait seam between the wiring core and the device emulation layer.

use sw_core::{ReceiverRef, SupplierRef};

use crate::category::{DeviceCategory, DeviceDescriptor};

/// Inventory and endpoint factory for the emulated robot-IO devices.
///
/// The graph builders call [`devices`](RobotIoBackend::devices) to populate
/// the robot-IO anchor; the compiler resolves each robot-side handle to a
/// concrete endpoint through [`supplier`](RobotIoBackend::supplier) and
/// [`receiver`](RobotIoBackend::receiver).
pub trait RobotIoBackend {
    /// Current device inventory, in a stable listing order.
    fn devices(&self) -> Vec<DeviceDescriptor>;

    /// Read endpoint for an output-category device (the commanded value).
    ///
    /// `None` if the device is unknown or its category is not an output.
    fn supplier(&self, category: DeviceCategory, origin_id: &str) -> Option<SupplierRef>;

    /// Write endpoint for an input-category device (the fed-back measurement).
    ///
    /// `None` if the device is unknown or its category is not an input.
    fn receiver(&self, category: DeviceCategory, origin_id: &str) -> Option<ReceiverRef>;
}
