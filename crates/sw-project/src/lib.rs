//! sw-project: canonical persisted form of the wiring graph.
//!
//! The document is a plain serializable structure (string-keyed maps of
//! nodes, handles, edges, and adjacency) suitable for storage in user
//! preferences and round-tripping through the editor UI.

pub mod convert;
pub mod hash;
pub mod migrate;
pub mod schema;
pub mod validate;

pub use convert::{from_graph, into_graph};
pub use hash::fingerprint;
pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_doc};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Graph error: {0}")]
    Graph(#[from] sw_graph::GraphError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Corrupt document: {what}")]
    Corrupt { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<WiringDoc> {
    let content = std::fs::read_to_string(path)?;
    let mut doc: WiringDoc = serde_json::from_str(&content)?;
    doc = migrate_to_latest(doc)?;
    validate_doc(&doc)?;
    Ok(doc)
}

pub fn save_json(path: &std::path::Path, doc: &WiringDoc) -> ProjectResult<()> {
    let doc = stamped(doc)?;
    let content = serde_json::to_string_pretty(&doc)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<WiringDoc> {
    let content = std::fs::read_to_string(path)?;
    let mut doc: WiringDoc = serde_yaml::from_str(&content)?;
    doc = migrate_to_latest(doc)?;
    validate_doc(&doc)?;
    Ok(doc)
}

pub fn save_yaml(path: &std::path::Path, doc: &WiringDoc) -> ProjectResult<()> {
    let doc = stamped(doc)?;
    let content = serde_yaml::to_string(&doc)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Validate and timestamp a document for writing.
fn stamped(doc: &WiringDoc) -> ProjectResult<WiringDoc> {
    validate_doc(doc)?;
    let mut doc = doc.clone();
    doc.saved_at = Some(chrono::Utc::now());
    Ok(doc)
}
