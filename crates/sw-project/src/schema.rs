//! Wiring document schema definitions.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sw_core::ValueKind;
use sw_devices::DeviceCategory;

use crate::migrate::LATEST_VERSION;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WiringDoc {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub nodes: BTreeMap<String, NodeDef>,
    #[serde(default)]
    pub handles: BTreeMap<String, HandleDef>,
    #[serde(default)]
    pub edges: BTreeMap<String, EdgeDef>,
    /// Handle id → ids of every edge touching it.
    #[serde(default)]
    pub adjacency: BTreeMap<String, Vec<String>>,
}

impl WiringDoc {
    /// An empty document at the current format version.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            version: LATEST_VERSION,
            name: name.into(),
            saved_at: None,
            nodes: BTreeMap::new(),
            handles: BTreeMap::new(),
            edges: BTreeMap::new(),
            adjacency: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub role: NodeRoleDef,
    /// `[x, y]` layout hint.
    pub position: [f64; 2],
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum NodeRoleDef {
    RobotIo,
    SimInput,
    SimOutput,
    Junction,
    Constructor,
    Deconstructor,
}

impl NodeRoleDef {
    pub fn is_anchor(self) -> bool {
        matches!(
            self,
            NodeRoleDef::RobotIo | NodeRoleDef::SimInput | NodeRoleDef::SimOutput
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandleDef {
    /// Owning node id.
    pub node: String,
    pub kind: ValueKind,
    pub is_source: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<OriginDef>,
    pub name: String,
    pub enabled: bool,
    pub many: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum OriginDef {
    Device {
        category: DeviceCategory,
        device_id: String,
    },
    Driver {
        driver_id: String,
    },
    Stimulus {
        stimulus_id: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EdgeDef {
    pub source: String,
    pub target: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_round_trip() {
        let mut doc = WiringDoc::empty("drivetrain");
        doc.nodes.insert(
            "0.1".to_string(),
            NodeDef {
                role: NodeRoleDef::RobotIo,
                position: [-260.0, 0.0],
                sources: vec!["1.1".to_string()],
                targets: vec![],
            },
        );
        doc.handles.insert(
            "1.1".to_string(),
            HandleDef {
                node: "0.1".to_string(),
                kind: ValueKind::Scalar,
                is_source: true,
                origin: Some(OriginDef::Device {
                    category: DeviceCategory::CanMotor,
                    device_id: "CAN[1]".to_string(),
                }),
                name: "CAN[1]".to_string(),
                enabled: true,
                many: false,
            },
        );
        doc.adjacency.insert("1.1".to_string(), vec![]);

        let json = serde_json::to_string(&doc).unwrap();
        let back: WiringDoc = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn missing_maps_default_to_empty() {
        let doc: WiringDoc =
            serde_json::from_str(r#"{"version": 1, "name": "empty"}"#).unwrap();
        assert!(doc.nodes.is_empty());
        assert!(doc.handles.is_empty());
        assert!(doc.edges.is_empty());
        assert!(doc.adjacency.is_empty());
        assert!(doc.saved_at.is_none());
    }

    #[test]
    fn role_tags_are_stable() {
        let json = serde_json::to_string(&NodeRoleDef::Deconstructor).unwrap();
        assert_eq!(json, r#"{"type":"Deconstructor"}"#);
        assert!(NodeRoleDef::RobotIo.is_anchor());
        assert!(!NodeRoleDef::Junction.is_anchor());
    }
}
