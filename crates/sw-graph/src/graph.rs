//! The mutable graph store.

use std::collections::{BTreeSet, HashMap};

use sw_core::{Arena, EdgeId, HandleId, NodeId, ValueKind};
use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::handle::{Handle, HandleDirection, HandleSpec};
use crate::node::{AnchorKind, Node, NodeRole, Position};

/// A validated connection between one source handle and one target handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub source: HandleId,
    pub target: HandleId,
}

/// The wiring graph: nodes, handles, edges, and the handle→edge adjacency
/// index.
///
/// The graph is owned by the caller (typically a per-assembly configuration
/// object). The compiler borrows it read-only and produces an independent
/// flow list with no back-references into the graph.
///
/// Invariants maintained by the mutation API:
/// - every live handle has an adjacency entry, possibly empty
/// - every edge id appears in exactly its two endpoints' adjacency sets
/// - a non-`many` target never has more than one incoming edge
/// - both endpoints of an edge share one `ValueKind`
#[derive(Default)]
pub struct Graph {
    nodes: Arena<Node>,
    handles: Arena<Handle>,
    edges: Arena<Edge>,
    adjacency: HashMap<HandleId, BTreeSet<EdgeId>>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // ----- accessors -------------------------------------------------------

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn handle(&self, id: HandleId) -> Option<&Handle> {
        self.handles.get(id)
    }

    /// Toggle a handle's enabled flag. Returns `false` if the handle is
    /// gone.
    pub fn set_handle_enabled(&mut self, id: HandleId, enabled: bool) -> bool {
        match self.handles.get_mut(id) {
            Some(handle) => {
                handle.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter()
    }

    pub fn handles(&self) -> impl Iterator<Item = (HandleId, &Handle)> {
        self.handles.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The singleton anchor node of the given kind, if present.
    pub fn anchor(&self, kind: AnchorKind) -> Option<NodeId> {
        self.nodes
            .iter()
            .find_map(|(id, node)| (node.role == NodeRole::Anchor(kind)).then_some(id))
    }

    /// Ids of every edge touching the handle, in id order.
    pub fn edges_of(&self, handle: HandleId) -> impl Iterator<Item = EdgeId> + '_ {
        self.adjacency.get(&handle).into_iter().flatten().copied()
    }

    /// Edges arriving at the handle (where it is the target endpoint).
    pub fn incoming(&self, handle: HandleId) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges_of(handle).filter(move |&id| {
            self.edges
                .get(id)
                .is_some_and(|edge| edge.target == handle)
        })
    }

    pub fn incoming_count(&self, handle: HandleId) -> usize {
        self.incoming(handle).count()
    }

    /// The edge joining the two handles: set-intersection of their adjacency
    /// entries.
    pub fn edge_between(&self, source: HandleId, target: HandleId) -> Option<EdgeId> {
        let a = self.adjacency.get(&source)?;
        let b = self.adjacency.get(&target)?;
        a.intersection(b).next().copied()
    }

    // ----- mutation --------------------------------------------------------

    /// Add a node. Anchor roles are singletons; a duplicate anchor is
    /// rejected.
    pub fn add_node(&mut self, role: NodeRole, position: Position) -> GraphResult<NodeId> {
        if let NodeRole::Anchor(kind) = role {
            if self.anchor(kind).is_some() {
                return Err(GraphError::AnchorExists { anchor: kind });
            }
        }
        Ok(self.nodes.insert(Node::new(role, position)))
    }

    /// Add a handle to a node and initialize its adjacency entry.
    pub fn add_handle(&mut self, node: NodeId, spec: HandleSpec) -> GraphResult<HandleId> {
        if !self.nodes.contains(node) {
            return Err(GraphError::NodeNotFound { node });
        }
        let direction = spec.direction;
        let id = self.handles.insert(Handle {
            node,
            kind: spec.kind,
            direction: spec.direction,
            origin: spec.origin,
            name: spec.name,
            enabled: spec.enabled,
            many: spec.many,
        });
        self.adjacency.insert(id, BTreeSet::new());
        if let Some(owner) = self.nodes.get_mut(node) {
            match direction {
                HandleDirection::Source => owner.sources.push(id),
                HandleDirection::Target => owner.targets.push(id),
            }
        }
        Ok(id)
    }

    /// Remove a handle, cascading to every edge touching it.
    ///
    /// No-op returning `false` if the handle does not exist.
    pub fn remove_handle(&mut self, id: HandleId) -> bool {
        let Some(handle) = self.handles.get(id) else {
            return false;
        };
        let owner = handle.node;

        let touching: Vec<EdgeId> = self.edges_of(id).collect();
        for edge in touching {
            self.delete_edge(edge);
        }

        self.adjacency.remove(&id);
        self.handles.remove(id);
        if let Some(node) = self.nodes.get_mut(owner) {
            node.sources.retain(|&h| h != id);
            node.targets.retain(|&h| h != id);
        }
        true
    }

    /// Remove a node, cascading to all its handles (and their edges).
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        let owned: Vec<HandleId> = node.handles().collect();
        for handle in owned {
            self.remove_handle(handle);
        }
        self.nodes.remove(id).is_some()
    }

    /// Check whether a (source, target) pair may be connected.
    ///
    /// False if either handle is missing, the pair is flipped (the named
    /// source must be a source and the named target a target), the target
    /// is non-`many` and already fed, the kinds differ, or the kind is
    /// `Unknown`.
    pub fn validate_connection(&self, source: HandleId, target: HandleId) -> bool {
        let (Some(src), Some(dst)) = (self.handles.get(source), self.handles.get(target)) else {
            return false;
        };
        if !src.is_source() || !dst.is_target() {
            return false;
        }
        if src.kind != dst.kind || src.kind == ValueKind::Unknown {
            return false;
        }
        if !dst.many && self.incoming_count(target) > 0 {
            return false;
        }
        true
    }

    /// Connect a source handle to a target handle.
    ///
    /// Re-validates, rejects duplicates, and records the new edge in both
    /// adjacency entries. Never partially applies; a rejection is logged
    /// and reported as `false`.
    pub fn make_connection(&mut self, source: HandleId, target: HandleId) -> bool {
        if !self.validate_connection(source, target) {
            debug!(%source, %target, "connection rejected: validation failed");
            return false;
        }
        if self.edge_between(source, target).is_some() {
            debug!(%source, %target, "connection rejected: duplicate edge");
            return false;
        }
        let id = self.edges.insert(Edge { source, target });
        self.adjacency.entry(source).or_default().insert(id);
        self.adjacency.entry(target).or_default().insert(id);
        true
    }

    /// Disconnect the edge between two handles, if any.
    pub fn delete_connection(&mut self, source: HandleId, target: HandleId) -> bool {
        match self.edge_between(source, target) {
            Some(id) => self.delete_edge(id),
            None => false,
        }
    }

    /// Remove an edge from the edge table and both adjacency entries.
    pub fn delete_edge(&mut self, id: EdgeId) -> bool {
        let Some(edge) = self.edges.remove(id) else {
            return false;
        };
        if let Some(set) = self.adjacency.get_mut(&edge.source) {
            set.remove(&id);
        }
        if let Some(set) = self.adjacency.get_mut(&edge.target) {
            set.remove(&id);
        }
        true
    }
}
