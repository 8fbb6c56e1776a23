//! Connection points.

use sw_core::{NodeId, ValueKind};
use sw_devices::DeviceCategory;

/// Direction of a connection point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleDirection {
    /// Produces a value.
    Source,
    /// Consumes a value.
    Target,
}

/// Where a handle's value comes from or goes to outside the graph.
///
/// Handles on structural function nodes carry no origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOrigin {
    /// Emulated robot-IO device channel.
    Device {
        category: DeviceCategory,
        device_id: String,
    },
    /// Physics-side actuator consuming commands.
    Driver { driver_id: String },
    /// Physics-side sensor producing measurements.
    Stimulus { stimulus_id: String },
}

/// A single typed connection point on a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Handle {
    /// Owning node.
    pub node: NodeId,
    /// Kind of value moving through this point.
    pub kind: ValueKind,
    pub direction: HandleDirection,
    /// External mapping, if any.
    pub origin: Option<HandleOrigin>,
    /// Human-readable display name.
    pub name: String,
    pub enabled: bool,
    /// Whether more than one incoming edge is permitted.
    ///
    /// Only meaningful for targets.
    pub many: bool,
}

impl Handle {
    pub fn is_source(&self) -> bool {
        self.direction == HandleDirection::Source
    }

    pub fn is_target(&self) -> bool {
        self.direction == HandleDirection::Target
    }
}

/// Template for [`Graph::add_handle`](crate::Graph::add_handle).
#[derive(Debug, Clone, PartialEq)]
pub struct HandleSpec {
    pub kind: ValueKind,
    pub direction: HandleDirection,
    pub origin: Option<HandleOrigin>,
    pub name: String,
    pub enabled: bool,
    pub many: bool,
}

impl HandleSpec {
    /// A source handle, enabled, with no origin.
    pub fn source(kind: ValueKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            direction: HandleDirection::Source,
            origin: None,
            name: name.into(),
            enabled: true,
            many: false,
        }
    }

    /// A target handle, enabled, single-edge, with no origin.
    pub fn target(kind: ValueKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            direction: HandleDirection::Target,
            origin: None,
            name: name.into(),
            enabled: true,
            many: false,
        }
    }

    pub fn origin(mut self, origin: HandleOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn many(mut self, many: bool) -> Self {
        self.many = many;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_builders() {
        let spec = HandleSpec::source(ValueKind::Scalar, "out");
        assert_eq!(spec.direction, HandleDirection::Source);
        assert!(spec.enabled);
        assert!(!spec.many);

        let spec = HandleSpec::target(ValueKind::Vector3, "accel")
            .origin(HandleOrigin::Device {
                category: DeviceCategory::Accelerometer,
                device_id: "SPI[0]".to_string(),
            })
            .enabled(false)
            .many(true);
        assert_eq!(spec.direction, HandleDirection::Target);
        assert!(spec.many);
        assert!(!spec.enabled);
        assert!(spec.origin.is_some());
    }
}
