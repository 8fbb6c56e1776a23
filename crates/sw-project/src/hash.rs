//! Content-based fingerprinting of wiring documents.

use sha2::{Digest, Sha256};

use crate::schema::WiringDoc;

/// Fingerprint of a document's canonical JSON form.
///
/// `BTreeMap` keys make the serialization canonical. The save timestamp is
/// excluded so two saves of the same wiring hash identically; the runtime
/// brain compares fingerprints to skip recompiling an unchanged graph.
pub fn fingerprint(doc: &WiringDoc) -> String {
    let mut content = doc.clone();
    content.saved_at = None;

    let mut hasher = Sha256::new();
    let json = serde_json::to_string(&content).unwrap_or_default();
    hasher.update(json.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NodeDef, NodeRoleDef};

    #[test]
    fn fingerprint_is_stable() {
        let doc = WiringDoc::empty("stable");
        assert_eq!(fingerprint(&doc), fingerprint(&doc.clone()));
    }

    #[test]
    fn fingerprint_ignores_save_timestamp() {
        let doc = WiringDoc::empty("stable");
        let mut stamped = doc.clone();
        stamped.saved_at = Some(chrono::Utc::now());
        assert_eq!(fingerprint(&doc), fingerprint(&stamped));
    }

    #[test]
    fn fingerprint_tracks_content() {
        let doc = WiringDoc::empty("a");
        let mut changed = doc.clone();
        changed.nodes.insert(
            "n".to_string(),
            NodeDef {
                role: NodeRoleDef::Junction,
                position: [0.0, 0.0],
                sources: vec![],
                targets: vec![],
            },
        );
        assert_ne!(fingerprint(&doc), fingerprint(&changed));
    }
}
