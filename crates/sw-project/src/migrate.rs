//! Schema migration framework.

use crate::ProjectError;
use crate::schema::WiringDoc;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut doc: WiringDoc) -> Result<WiringDoc, ProjectError> {
    while doc.version < LATEST_VERSION {
        doc = migrate_one_version(doc)?;
    }
    Ok(doc)
}

fn migrate_one_version(doc: WiringDoc) -> Result<WiringDoc, ProjectError> {
    match doc.version {
        0 => migrate_v0_to_v1(doc),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// v0 documents predate the persisted adjacency index; rebuild it from the
/// edge table.
fn migrate_v0_to_v1(mut doc: WiringDoc) -> Result<WiringDoc, ProjectError> {
    doc.adjacency.clear();
    for handle_id in doc.handles.keys() {
        doc.adjacency.insert(handle_id.clone(), Vec::new());
    }
    for (edge_id, edge) in &doc.edges {
        for endpoint in [&edge.source, &edge.target] {
            doc.adjacency
                .entry(endpoint.clone())
                .or_default()
                .push(edge_id.clone());
        }
    }
    doc.version = 1;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EdgeDef, HandleDef, NodeDef, NodeRoleDef};
    use sw_core::ValueKind;

    fn v0_doc() -> WiringDoc {
        let mut doc = WiringDoc::empty("old");
        doc.version = 0;
        doc.nodes.insert(
            "n".to_string(),
            NodeDef {
                role: NodeRoleDef::Junction,
                position: [0.0, 0.0],
                sources: vec!["s".to_string()],
                targets: vec!["t".to_string()],
            },
        );
        for (id, is_source) in [("s", true), ("t", false)] {
            doc.handles.insert(
                id.to_string(),
                HandleDef {
                    node: "n".to_string(),
                    kind: ValueKind::Scalar,
                    is_source,
                    origin: None,
                    name: id.to_string(),
                    enabled: true,
                    many: false,
                },
            );
        }
        doc.edges.insert(
            "e".to_string(),
            EdgeDef {
                source: "s".to_string(),
                target: "t".to_string(),
            },
        );
        doc
    }

    #[test]
    fn migrate_latest_is_noop() {
        let doc = WiringDoc::empty("current");
        let migrated = migrate_to_latest(doc.clone()).unwrap();
        assert_eq!(migrated, doc);
    }

    #[test]
    fn migrate_v0_rebuilds_adjacency() {
        let migrated = migrate_to_latest(v0_doc()).unwrap();
        assert_eq!(migrated.version, LATEST_VERSION);
        assert_eq!(migrated.adjacency["s"], vec!["e".to_string()]);
        assert_eq!(migrated.adjacency["t"], vec!["e".to_string()]);
        crate::validate::validate_doc(&migrated).unwrap();
    }

    #[test]
    fn future_versions_pass_through_untouched() {
        // Migration only walks upward; validation rejects a too-new
        // version downstream.
        let mut doc = WiringDoc::empty("future");
        doc.version = LATEST_VERSION + 5;
        let migrated = migrate_to_latest(doc).unwrap();
        assert_eq!(migrated.version, LATEST_VERSION + 5);
    }
}
