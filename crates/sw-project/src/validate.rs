//! Document validation logic.

use std::collections::BTreeSet;

use crate::migrate::LATEST_VERSION;
use crate::schema::WiringDoc;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Duplicate {what}: {id}")]
    Duplicate { what: &'static str, id: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Inconsistent {what}: {detail}")]
    Inconsistent { what: &'static str, detail: String },
}

/// Check the document's referential integrity.
///
/// Everything a graph rebuild relies on is verified here: node↔handle
/// agreement (both directions, including direction flags), edge endpoints,
/// exact adjacency/edge correspondence, and the anchor singleton rule.
pub fn validate_doc(doc: &WiringDoc) -> Result<(), ValidationError> {
    if doc.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: doc.version,
        });
    }

    let mut anchors = BTreeSet::new();
    for (node_id, node) in &doc.nodes {
        if node.role.is_anchor() && !anchors.insert(format!("{:?}", node.role)) {
            return Err(ValidationError::Duplicate {
                what: "anchor",
                id: node_id.clone(),
            });
        }

        for (handle_id, expect_source) in node
            .sources
            .iter()
            .map(|id| (id, true))
            .chain(node.targets.iter().map(|id| (id, false)))
        {
            let Some(handle) = doc.handles.get(handle_id) else {
                return Err(ValidationError::MissingReference {
                    id: handle_id.clone(),
                    context: format!("node {node_id} handle list"),
                });
            };
            if handle.node != *node_id {
                return Err(ValidationError::Inconsistent {
                    what: "handle owner",
                    detail: format!(
                        "node {node_id} lists handle {handle_id} owned by {}",
                        handle.node
                    ),
                });
            }
            if handle.is_source != expect_source {
                return Err(ValidationError::Inconsistent {
                    what: "handle direction",
                    detail: format!("handle {handle_id} is in the wrong list of node {node_id}"),
                });
            }
        }
    }

    for (handle_id, handle) in &doc.handles {
        let Some(node) = doc.nodes.get(&handle.node) else {
            return Err(ValidationError::MissingReference {
                id: handle.node.clone(),
                context: format!("handle {handle_id} owner"),
            });
        };
        if !node.sources.contains(handle_id) && !node.targets.contains(handle_id) {
            return Err(ValidationError::Inconsistent {
                what: "node handle list",
                detail: format!("handle {handle_id} is not listed by node {}", handle.node),
            });
        }
        if !doc.adjacency.contains_key(handle_id) {
            return Err(ValidationError::MissingReference {
                id: handle_id.clone(),
                context: "adjacency".to_string(),
            });
        }
    }

    for (edge_id, edge) in &doc.edges {
        for endpoint in [&edge.source, &edge.target] {
            if !doc.handles.contains_key(endpoint) {
                return Err(ValidationError::MissingReference {
                    id: endpoint.clone(),
                    context: format!("edge {edge_id}"),
                });
            }
            let touches = doc
                .adjacency
                .get(endpoint)
                .is_some_and(|edges| edges.contains(edge_id));
            if !touches {
                return Err(ValidationError::Inconsistent {
                    what: "adjacency",
                    detail: format!("edge {edge_id} missing from adjacency of {endpoint}"),
                });
            }
        }
    }

    for (handle_id, edge_ids) in &doc.adjacency {
        if !doc.handles.contains_key(handle_id) {
            return Err(ValidationError::MissingReference {
                id: handle_id.clone(),
                context: "adjacency key".to_string(),
            });
        }
        for edge_id in edge_ids {
            let Some(edge) = doc.edges.get(edge_id) else {
                return Err(ValidationError::MissingReference {
                    id: edge_id.clone(),
                    context: format!("adjacency of {handle_id}"),
                });
            };
            if edge.source != *handle_id && edge.target != *handle_id {
                return Err(ValidationError::Inconsistent {
                    what: "adjacency",
                    detail: format!("edge {edge_id} does not touch handle {handle_id}"),
                });
            }
        }
    }

    Ok(())
}
