//! Compilation errors.

use sw_core::{HandleId, NodeId, ValueKind};
use sw_graph::FunctionKind;
use thiserror::Error;

/// Result type for compilation.
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that abort a compile pass.
///
/// Threaded as an early-returning `Result` through every recursive call;
/// the caller keeps its previous flow program on failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// An edge or node list referenced a handle that is gone.
    #[error("handle {handle} is referenced but missing from the graph")]
    DanglingHandle { handle: HandleId },

    /// A handle referenced an owning node that is gone.
    #[error("node {node} is referenced but missing from the graph")]
    DanglingNode { node: NodeId },

    /// A function node with the wrong handle counts for its kind.
    #[error("{function:?} node {node} has {sources} source and {targets} target handles")]
    BadArity {
        node: NodeId,
        function: FunctionKind,
        sources: usize,
        targets: usize,
    },

    /// A constructor/deconstructor over a kind with no decomposition.
    #[error("no decomposition defined for kind {kind}")]
    NoDecomposition { kind: ValueKind },

    /// No write endpoint could be resolved for a target handle.
    #[error("no receiver resolved for {what}")]
    UnresolvedReceiver { what: String },

    /// No read endpoint could be resolved for a source handle.
    #[error("no supplier resolved for {what}")]
    UnresolvedSupplier { what: String },

    /// Multiple edges feed a target whose kind defines no combination rule.
    #[error("target handle {handle} of non-aggregable kind {kind} has multiple incoming edges")]
    AmbiguousFanIn { handle: HandleId, kind: ValueKind },

    /// Every incoming edge of a wired target was skipped or unresolvable.
    #[error("no supplier available for target handle {handle}")]
    NoSupplier { handle: HandleId },
}
