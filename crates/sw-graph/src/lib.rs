//! sw-graph: the editable wiring graph.
//!
//! Provides:
//! - Core data structures (Node, Handle, Edge) and the adjacency index
//! - The mutation API (add/remove nodes and handles, connect/disconnect)
//!   with referential-integrity cascades
//! - Structural node synthesis (junction, constructor, deconstructor)
//!
//! # Example
//!
//! ```
//! use sw_core::ValueKind;
//! use sw_graph::{FunctionKind, Graph, NodeRole, Position};
//!
//! let mut graph = Graph::new();
//! let junction = graph
//!     .add_junction_node(ValueKind::Scalar, Position::default())
//!     .unwrap();
//! let node = graph.node(junction).unwrap();
//! assert_eq!(node.role, NodeRole::Function(FunctionKind::Junction));
//! assert_eq!(node.sources().len(), 1);
//! assert_eq!(node.targets().len(), 1);
//! ```

pub mod error;
pub mod graph;
pub mod handle;
pub mod node;
mod structural;

// Re-exports for ergonomics
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, Graph};
pub use handle::{Handle, HandleDirection, HandleOrigin, HandleSpec};
pub use node::{AnchorKind, FunctionKind, Node, NodeRole, Position};
