//! In-memory emulated device bank.

use std::collections::BTreeMap;
use std::sync::Arc;

use sw_core::{ReceiverRef, SignalCell, SupplierRef, Value};

use crate::backend::RobotIoBackend;
use crate::category::{DeviceCategory, DeviceDescriptor};

/// One registered emulated device: its init state and its backing cell.
struct EmulatedDevice {
    initialized: bool,
    cell: Arc<SignalCell>,
}

/// Emulated robot-IO device bank.
///
/// Stands in for the real device emulation layer at the interface boundary:
/// each registered device is backed by one shared [`SignalCell`]. For output
/// categories the robot side commands the cell via [`set_output`] and the
/// compiled flows read it; for input categories the flows write measurements
/// into the cell and the robot side reads them back via [`input`].
///
/// [`set_output`]: EmulatedRio::set_output
/// [`input`]: EmulatedRio::input
#[derive(Default)]
pub struct EmulatedRio {
    devices: BTreeMap<(DeviceCategory, String), EmulatedDevice>,
}

impl EmulatedRio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device; returns `false` if it already exists.
    pub fn add_device(
        &mut self,
        category: DeviceCategory,
        origin_id: impl Into<String>,
        initialized: bool,
    ) -> bool {
        let key = (category, origin_id.into());
        if self.devices.contains_key(&key) {
            return false;
        }
        let initial = Value::zero(category.signal_kind())
            .unwrap_or(Value::Scalar(0.0));
        self.devices.insert(
            key,
            EmulatedDevice {
                initialized,
                cell: SignalCell::new(initial),
            },
        );
        true
    }

    /// Drop a device from the bank; returns `false` if it was not present.
    ///
    /// The backing cell stays alive for any flow still holding it; the next
    /// graph refresh removes the stale handle and recompiles.
    pub fn remove_device(&mut self, category: DeviceCategory, origin_id: &str) -> bool {
        self.devices
            .remove(&(category, origin_id.to_string()))
            .is_some()
    }

    /// Command an output device's value, as the robot code would.
    pub fn set_output(&self, category: DeviceCategory, origin_id: &str, value: Value) -> bool {
        if !category.is_robot_output() {
            return false;
        }
        match self.device(category, origin_id) {
            Some(device) => {
                device.cell.set(value);
                true
            }
            None => false,
        }
    }

    /// Read back the measurement last written into an input device.
    pub fn input(&self, category: DeviceCategory, origin_id: &str) -> Option<Value> {
        if category.is_robot_output() {
            return None;
        }
        self.device(category, origin_id)
            .map(|device| device.cell.get())
    }

    fn device(&self, category: DeviceCategory, origin_id: &str) -> Option<&EmulatedDevice> {
        self.devices.get(&(category, origin_id.to_string()))
    }
}

impl RobotIoBackend for EmulatedRio {
    fn devices(&self) -> Vec<DeviceDescriptor> {
        self.devices
            .iter()
            .map(|((category, origin_id), device)| {
                DeviceDescriptor::new(*category, origin_id.clone(), device.initialized)
            })
            .collect()
    }

    fn supplier(&self, category: DeviceCategory, origin_id: &str) -> Option<SupplierRef> {
        if !category.is_robot_output() {
            return None;
        }
        self.device(category, origin_id)
            .map(|device| device.cell.clone() as SupplierRef)
    }

    fn receiver(&self, category: DeviceCategory, origin_id: &str) -> Option<ReceiverRef> {
        if category.is_robot_output() {
            return None;
        }
        self.device(category, origin_id)
            .map(|device| device.cell.clone() as ReceiverRef)
    }
}
