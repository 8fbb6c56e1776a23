//! Graph-specific error types.

use sw_core::{NodeId, ValueKind};
use thiserror::Error;

use crate::node::AnchorKind;

/// Result type for graph mutations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors rejected at graph construction time.
///
/// Connection-time violations (type mismatch, cardinality, duplicates) are
/// not errors: the connect operations are no-ops that report failure through
/// their boolean result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A handle was addressed to a node that does not exist.
    #[error("node {node} does not exist")]
    NodeNotFound { node: NodeId },

    /// A second anchor of the same kind was requested.
    #[error("{anchor:?} anchor already exists")]
    AnchorExists { anchor: AnchorKind },

    /// A constructor/deconstructor was requested for a kind with no
    /// decomposition.
    #[error("no decomposition defined for kind {kind}")]
    NoDecomposition { kind: ValueKind },

    /// A structural node was requested for a kind that cannot carry values.
    #[error("kind {kind} cannot form a structural node")]
    InvalidKind { kind: ValueKind },
}
