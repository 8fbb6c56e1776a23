//! Device taxonomy and the fixed category tables.

use core::fmt;

use serde::{Deserialize, Serialize};
use sw_core::ValueKind;

/// Closed set of emulated robot-IO device categories.
///
/// Output categories (motor controllers, PWM channels) produce the value the
/// robot code last commanded; input categories (encoders, accelerometers)
/// consume measurements written back by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceCategory {
    /// CAN-bus motor controller.
    CanMotor,
    /// Raw PWM output channel.
    PwmChannel,
    /// Quadrature encoder.
    Encoder,
    /// Three-axis accelerometer.
    Accelerometer,
}

impl DeviceCategory {
    /// Kind of signal a device of this category carries.
    pub fn signal_kind(self) -> ValueKind {
        match self {
            DeviceCategory::CanMotor => ValueKind::Scalar,
            DeviceCategory::PwmChannel => ValueKind::Scalar,
            DeviceCategory::Encoder => ValueKind::Scalar,
            DeviceCategory::Accelerometer => ValueKind::Vector3,
        }
    }

    /// True if devices of this category are robot outputs.
    ///
    /// An output device's robot-IO handle is a source (it supplies the
    /// commanded value); an input device's handle is a target (it receives
    /// a measurement).
    pub fn is_robot_output(self) -> bool {
        match self {
            DeviceCategory::CanMotor | DeviceCategory::PwmChannel => true,
            DeviceCategory::Encoder | DeviceCategory::Accelerometer => false,
        }
    }

    /// All categories, in inventory-listing order.
    pub fn all() -> &'static [DeviceCategory] {
        &[
            DeviceCategory::CanMotor,
            DeviceCategory::PwmChannel,
            DeviceCategory::Encoder,
            DeviceCategory::Accelerometer,
        ]
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceCategory::CanMotor => "CAN motor",
            DeviceCategory::PwmChannel => "PWM channel",
            DeviceCategory::Encoder => "encoder",
            DeviceCategory::Accelerometer => "accelerometer",
        };
        write!(f, "{name}")
    }
}

/// One device reported by the robot-IO inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub category: DeviceCategory,
    /// Stable device identifier, e.g. `CAN[3]` or `PWM[0]`.
    pub origin_id: String,
    /// Whether the robot code has initialized the device.
    pub initialized: bool,
}

impl DeviceDescriptor {
    pub fn new(category: DeviceCategory, origin_id: impl Into<String>, initialized: bool) -> Self {
        Self {
            category,
            origin_id: origin_id.into(),
            initialized,
        }
    }
}
