//! In-memory simulation layer for tests and demos.

use std::collections::BTreeMap;
use std::sync::Arc;

use sw_core::{ReceiverRef, SignalCell, SupplierRef, Value};

use crate::layer::{DriverInfo, SimulationLayer, StimulusInfo};

/// Loopback simulation layer.
///
/// Each registered driver or stimulus is backed by one shared
/// [`SignalCell`]: compiled flows write commands into driver cells and read
/// measurements out of stimulus cells, while the test harness pokes the
/// other side through [`set_stimulus`](LoopbackSim::set_stimulus) and
/// [`driver_value`](LoopbackSim::driver_value).
#[derive(Default)]
pub struct LoopbackSim {
    drivers: BTreeMap<String, Arc<SignalCell>>,
    stimuli: BTreeMap<String, Arc<SignalCell>>,
}

impl LoopbackSim {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a driver initialized to `initial`; returns `false` if the
    /// id is taken.
    pub fn add_driver(&mut self, origin_id: impl Into<String>, initial: Value) -> bool {
        let origin_id = origin_id.into();
        if self.drivers.contains_key(&origin_id) {
            return false;
        }
        self.drivers.insert(origin_id, SignalCell::new(initial));
        true
    }

    /// Register a stimulus initialized to `initial`; returns `false` if the
    /// id is taken.
    pub fn add_stimulus(&mut self, origin_id: impl Into<String>, initial: Value) -> bool {
        let origin_id = origin_id.into();
        if self.stimuli.contains_key(&origin_id) {
            return false;
        }
        self.stimuli.insert(origin_id, SignalCell::new(initial));
        true
    }

    /// Set the measurement a stimulus produces, as the physics step would.
    pub fn set_stimulus(&self, origin_id: &str, value: Value) -> bool {
        match self.stimuli.get(origin_id) {
            Some(cell) => {
                cell.set(value);
                true
            }
            None => false,
        }
    }

    /// The command last written into a driver.
    pub fn driver_value(&self, origin_id: &str) -> Option<Value> {
        self.drivers.get(origin_id).map(|cell| cell.get())
    }
}

impl SimulationLayer for LoopbackSim {
    fn drivers(&self) -> Vec<DriverInfo> {
        self.drivers
            .iter()
            .map(|(origin_id, cell)| DriverInfo::new(origin_id.clone(), cell.cell_kind()))
            .collect()
    }

    fn stimuli(&self) -> Vec<StimulusInfo> {
        self.stimuli
            .iter()
            .map(|(origin_id, cell)| StimulusInfo::new(origin_id.clone(), cell.cell_kind()))
            .collect()
    }

    fn driver(&self, origin_id: &str) -> Option<ReceiverRef> {
        self.drivers
            .get(origin_id)
            .map(|cell| cell.clone() as ReceiverRef)
    }

    fn stimulus(&self, origin_id: &str) -> Option<SupplierRef> {
        self.stimuli
            .get(origin_id)
            .map(|cell| cell.clone() as SupplierRef)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_core::{Receiver, Supplier, ValueKind};

    #[test]
    fn inventories_list_registrations() {
        let mut sim = LoopbackSim::new();
        sim.add_driver("drivetrain/left", Value::Scalar(0.0));
        sim.add_driver("drivetrain/right", Value::Scalar(0.0));
        sim.add_stimulus(
            "imu/accel",
            Value::compose(ValueKind::Vector3, &[0.0, 0.0, 0.0]).unwrap(),
        );

        assert_eq!(sim.drivers().len(), 2);
        let stimuli = sim.stimuli();
        assert_eq!(stimuli.len(), 1);
        assert_eq!(stimuli[0].kind, ValueKind::Vector3);
        assert!(!sim.add_driver("drivetrain/left", Value::Scalar(0.0)));
    }

    #[test]
    fn driver_receives_commands() {
        let mut sim = LoopbackSim::new();
        sim.add_driver("arm/elevator", Value::Scalar(0.0));

        let receiver = sim.driver("arm/elevator").unwrap();
        receiver.write(Value::Scalar(0.6));
        assert_eq!(sim.driver_value("arm/elevator"), Some(Value::Scalar(0.6)));
        assert!(sim.driver("missing").is_none());
    }

    #[test]
    fn stimulus_supplies_measurements() {
        let mut sim = LoopbackSim::new();
        sim.add_stimulus("arm/angle", Value::Scalar(0.0));
        sim.set_stimulus("arm/angle", Value::Scalar(90.0));

        let supplier = sim.stimulus("arm/angle").unwrap();
        assert_eq!(supplier.read(), Value::Scalar(90.0));
        assert!(!sim.set_stimulus("missing", Value::Scalar(0.0)));
    }
}
