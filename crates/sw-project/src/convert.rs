//! Graph ⇄ document conversion.

use std::collections::HashMap;

use sw_core::HandleId;
use sw_graph::{
    AnchorKind, FunctionKind, Graph, HandleOrigin, HandleSpec, NodeRole, Position,
};

use crate::ProjectError;
use crate::schema::{EdgeDef, HandleDef, NodeDef, NodeRoleDef, OriginDef, WiringDoc};
use crate::validate::validate_doc;

fn role_def(role: NodeRole) -> NodeRoleDef {
    match role {
        NodeRole::Anchor(AnchorKind::RobotIo) => NodeRoleDef::RobotIo,
        NodeRole::Anchor(AnchorKind::SimInput) => NodeRoleDef::SimInput,
        NodeRole::Anchor(AnchorKind::SimOutput) => NodeRoleDef::SimOutput,
        NodeRole::Function(FunctionKind::Junction) => NodeRoleDef::Junction,
        NodeRole::Function(FunctionKind::Constructor) => NodeRoleDef::Constructor,
        NodeRole::Function(FunctionKind::Deconstructor) => NodeRoleDef::Deconstructor,
    }
}

fn role_from_def(def: NodeRoleDef) -> NodeRole {
    match def {
        NodeRoleDef::RobotIo => NodeRole::Anchor(AnchorKind::RobotIo),
        NodeRoleDef::SimInput => NodeRole::Anchor(AnchorKind::SimInput),
        NodeRoleDef::SimOutput => NodeRole::Anchor(AnchorKind::SimOutput),
        NodeRoleDef::Junction => NodeRole::Function(FunctionKind::Junction),
        NodeRoleDef::Constructor => NodeRole::Function(FunctionKind::Constructor),
        NodeRoleDef::Deconstructor => NodeRole::Function(FunctionKind::Deconstructor),
    }
}

fn origin_def(origin: &HandleOrigin) -> OriginDef {
    match origin {
        HandleOrigin::Device {
            category,
            device_id,
        } => OriginDef::Device {
            category: *category,
            device_id: device_id.clone(),
        },
        HandleOrigin::Driver { driver_id } => OriginDef::Driver {
            driver_id: driver_id.clone(),
        },
        HandleOrigin::Stimulus { stimulus_id } => OriginDef::Stimulus {
            stimulus_id: stimulus_id.clone(),
        },
    }
}

fn origin_from_def(def: &OriginDef) -> HandleOrigin {
    match def {
        OriginDef::Device {
            category,
            device_id,
        } => HandleOrigin::Device {
            category: *category,
            device_id: device_id.clone(),
        },
        OriginDef::Driver { driver_id } => HandleOrigin::Driver {
            driver_id: driver_id.clone(),
        },
        OriginDef::Stimulus { stimulus_id } => HandleOrigin::Stimulus {
            stimulus_id: stimulus_id.clone(),
        },
    }
}

/// Snapshot a graph into its persisted form.
///
/// Entity ids become string keys; handle ordering within each node is
/// preserved through the node's source/target lists.
pub fn from_graph(name: &str, graph: &Graph) -> WiringDoc {
    let mut doc = WiringDoc::empty(name);

    for (id, node) in graph.nodes() {
        doc.nodes.insert(
            id.to_string(),
            NodeDef {
                role: role_def(node.role),
                position: [node.position.x, node.position.y],
                sources: node.sources().iter().map(|h| h.to_string()).collect(),
                targets: node.targets().iter().map(|h| h.to_string()).collect(),
            },
        );
    }

    for (id, handle) in graph.handles() {
        doc.handles.insert(
            id.to_string(),
            HandleDef {
                node: handle.node.to_string(),
                kind: handle.kind,
                is_source: handle.is_source(),
                origin: handle.origin.as_ref().map(origin_def),
                name: handle.name.clone(),
                enabled: handle.enabled,
                many: handle.many,
            },
        );
        doc.adjacency.insert(
            id.to_string(),
            graph.edges_of(id).map(|e| e.to_string()).collect(),
        );
    }

    for (id, edge) in graph.edges() {
        doc.edges.insert(
            id.to_string(),
            EdgeDef {
                source: edge.source.to_string(),
                target: edge.target.to_string(),
            },
        );
    }

    doc
}

/// Rebuild a graph from its persisted form.
///
/// The document is validated first, and every edge is replayed through the
/// store's connect path, so a hand-edited file cannot smuggle in a graph
/// that violates the connection invariants.
pub fn into_graph(doc: &WiringDoc) -> Result<Graph, ProjectError> {
    validate_doc(doc)?;

    let mut graph = Graph::new();
    let mut handle_ids: HashMap<&String, HandleId> = HashMap::new();

    for def in doc.nodes.values() {
        let node = graph.add_node(
            role_from_def(def.role),
            Position::new(def.position[0], def.position[1]),
        )?;
        for handle_key in def.sources.iter().chain(def.targets.iter()) {
            let Some(hdef) = doc.handles.get(handle_key) else {
                return Err(ProjectError::Corrupt {
                    what: format!("handle {handle_key} is listed but not defined"),
                });
            };
            let mut spec = if hdef.is_source {
                HandleSpec::source(hdef.kind, hdef.name.clone())
            } else {
                HandleSpec::target(hdef.kind, hdef.name.clone()).many(hdef.many)
            }
            .enabled(hdef.enabled);
            if let Some(origin) = &hdef.origin {
                spec = spec.origin(origin_from_def(origin));
            }
            let id = graph.add_handle(node, spec)?;
            handle_ids.insert(handle_key, id);
        }
    }

    for (edge_key, edge) in &doc.edges {
        let (Some(&source), Some(&target)) = (
            handle_ids.get(&edge.source),
            handle_ids.get(&edge.target),
        ) else {
            return Err(ProjectError::Corrupt {
                what: format!("edge {edge_key} references an unknown handle"),
            });
        };
        if !graph.make_connection(source, target) {
            return Err(ProjectError::Corrupt {
                what: format!("edge {edge_key} violates connection invariants"),
            });
        }
    }

    Ok(graph)
}
