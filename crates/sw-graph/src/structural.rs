//! Structural (function) node synthesis.
//!
//! Junctions, constructors, and deconstructors are synthesized with their
//! handles in one operation so their arity is correct by construction. The
//! part handles of constructor/deconstructor nodes are created in the
//! composite kind's decomposition order.

use sw_core::{NodeId, ValueKind};

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;
use crate::handle::HandleSpec;
use crate::node::{FunctionKind, NodeRole, Position};

/// Display names for decomposed vector components.
const COMPONENT_NAMES: [&str; 3] = ["x", "y", "z"];

fn part_name(index: usize) -> &'static str {
    COMPONENT_NAMES.get(index).copied().unwrap_or("part")
}

impl Graph {
    /// Add a pass-through junction for `kind`: one target in, one source out.
    ///
    /// Any concrete kind is accepted; `Unknown` carries no values and is
    /// rejected.
    pub fn add_junction_node(&mut self, kind: ValueKind, position: Position) -> GraphResult<NodeId> {
        if kind == ValueKind::Unknown {
            return Err(GraphError::InvalidKind { kind });
        }
        let node = self.add_node(NodeRole::Function(FunctionKind::Junction), position)?;
        self.add_handle(
            node,
            HandleSpec::target(kind, "in").many(kind.is_aggregable()),
        )?;
        self.add_handle(node, HandleSpec::source(kind, "out"))?;
        Ok(node)
    }

    /// Add a constructor for a composite `kind`: one part target per
    /// decomposed component, one composite source out.
    ///
    /// Fails if the kind has no decomposition.
    pub fn add_constructor_node(
        &mut self,
        kind: ValueKind,
        position: Position,
    ) -> GraphResult<NodeId> {
        let parts = kind
            .decompose()
            .ok_or(GraphError::NoDecomposition { kind })?;
        let node = self.add_node(NodeRole::Function(FunctionKind::Constructor), position)?;
        for (index, part) in parts.iter().enumerate() {
            self.add_handle(
                node,
                HandleSpec::target(*part, part_name(index)).many(part.is_aggregable()),
            )?;
        }
        self.add_handle(node, HandleSpec::source(kind, "out"))?;
        Ok(node)
    }

    /// Add a deconstructor for a composite `kind`: one composite target in,
    /// one part source per decomposed component.
    ///
    /// Fails if the kind has no decomposition.
    pub fn add_deconstructor_node(
        &mut self,
        kind: ValueKind,
        position: Position,
    ) -> GraphResult<NodeId> {
        let parts = kind
            .decompose()
            .ok_or(GraphError::NoDecomposition { kind })?;
        let node = self.add_node(NodeRole::Function(FunctionKind::Deconstructor), position)?;
        self.add_handle(node, HandleSpec::target(kind, "in"))?;
        for (index, part) in parts.iter().enumerate() {
            self.add_handle(node, HandleSpec::source(*part, part_name(index)))?;
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::HandleDirection;

    #[test]
    fn junction_shape() {
        let mut graph = Graph::new();
        let node = graph
            .add_junction_node(ValueKind::Scalar, Position::default())
            .unwrap();
        let node = graph.node(node).unwrap();
        assert_eq!(node.role, NodeRole::Function(FunctionKind::Junction));
        assert_eq!(node.sources().len(), 1);
        assert_eq!(node.targets().len(), 1);

        let target = graph.handle(node.targets()[0]).unwrap();
        assert!(target.many, "scalar junction inputs aggregate");
        assert_eq!(target.kind, ValueKind::Scalar);
        assert!(target.origin.is_none());
    }

    #[test]
    fn junction_rejects_unknown() {
        let mut graph = Graph::new();
        let result = graph.add_junction_node(ValueKind::Unknown, Position::default());
        assert_eq!(
            result,
            Err(GraphError::InvalidKind {
                kind: ValueKind::Unknown
            })
        );
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn constructor_shape() {
        let mut graph = Graph::new();
        let node = graph
            .add_constructor_node(ValueKind::Vector3, Position::default())
            .unwrap();
        let node = graph.node(node).unwrap();
        assert_eq!(node.sources().len(), 1);
        assert_eq!(node.targets().len(), 3);

        let out = graph.handle(node.sources()[0]).unwrap();
        assert_eq!(out.kind, ValueKind::Vector3);
        assert_eq!(out.direction, HandleDirection::Source);

        let names: Vec<_> = node
            .targets()
            .iter()
            .map(|&h| graph.handle(h).unwrap().name.clone())
            .collect();
        assert_eq!(names, ["x", "y", "z"]);
        for &part in node.targets() {
            assert_eq!(graph.handle(part).unwrap().kind, ValueKind::Scalar);
        }
    }

    #[test]
    fn deconstructor_shape() {
        let mut graph = Graph::new();
        let node = graph
            .add_deconstructor_node(ValueKind::Vector2, Position::default())
            .unwrap();
        let node = graph.node(node).unwrap();
        assert_eq!(node.sources().len(), 2);
        assert_eq!(node.targets().len(), 1);

        let input = graph.handle(node.targets()[0]).unwrap();
        assert_eq!(input.kind, ValueKind::Vector2);
        assert!(!input.many, "composite kinds do not aggregate");
    }

    #[test]
    fn scalar_has_no_constructor_or_deconstructor() {
        let mut graph = Graph::new();
        assert_eq!(
            graph.add_constructor_node(ValueKind::Scalar, Position::default()),
            Err(GraphError::NoDecomposition {
                kind: ValueKind::Scalar
            })
        );
        assert_eq!(
            graph.add_deconstructor_node(ValueKind::Unknown, Position::default()),
            Err(GraphError::NoDecomposition {
                kind: ValueKind::Unknown
            })
        );
        // A failed request leaves no node behind.
        assert_eq!(graph.node_count(), 0);
    }
}
