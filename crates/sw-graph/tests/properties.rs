//! Property tests over random operation sequences.

use proptest::prelude::*;
use sw_core::{HandleId, ValueKind};
use sw_graph::{Graph, HandleDirection, Position};

#[derive(Debug, Clone)]
enum Op {
    AddJunction(ValueKind),
    Connect { source: usize, target: usize },
    Disconnect { source: usize, target: usize },
    RemoveNode(usize),
}

fn kind_strategy() -> impl Strategy<Value = ValueKind> {
    prop_oneof![
        Just(ValueKind::Scalar),
        Just(ValueKind::Vector2),
        Just(ValueKind::Vector3),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        kind_strategy().prop_map(Op::AddJunction),
        (0..24usize, 0..24usize).prop_map(|(source, target)| Op::Connect { source, target }),
        (0..24usize, 0..24usize).prop_map(|(source, target)| Op::Disconnect { source, target }),
        (0..24usize).prop_map(Op::RemoveNode),
    ]
}

/// Apply an operation sequence, indexing sources/targets into whatever
/// handles happen to be live, and check the store invariants afterwards.
fn run_ops(ops: &[Op]) -> Graph {
    let mut graph = Graph::new();
    let mut nodes = Vec::new();

    for op in ops {
        match op {
            Op::AddJunction(kind) => {
                let node = graph
                    .add_junction_node(*kind, Position::default())
                    .expect("junction kinds are concrete");
                nodes.push(node);
            }
            Op::Connect { source, target } => {
                let sources: Vec<HandleId> = graph
                    .handles()
                    .filter(|(_, h)| h.is_source())
                    .map(|(id, _)| id)
                    .collect();
                let targets: Vec<HandleId> = graph
                    .handles()
                    .filter(|(_, h)| h.is_target())
                    .map(|(id, _)| id)
                    .collect();
                if sources.is_empty() || targets.is_empty() {
                    continue;
                }
                let s = sources[source % sources.len()];
                let t = targets[target % targets.len()];
                graph.make_connection(s, t);
            }
            Op::Disconnect { source, target } => {
                let sources: Vec<HandleId> = graph
                    .handles()
                    .filter(|(_, h)| h.is_source())
                    .map(|(id, _)| id)
                    .collect();
                let targets: Vec<HandleId> = graph
                    .handles()
                    .filter(|(_, h)| h.is_target())
                    .map(|(id, _)| id)
                    .collect();
                if sources.is_empty() || targets.is_empty() {
                    continue;
                }
                graph.delete_connection(
                    sources[source % sources.len()],
                    targets[target % targets.len()],
                );
            }
            Op::RemoveNode(index) => {
                if nodes.is_empty() {
                    continue;
                }
                let node = nodes.remove(index % nodes.len());
                graph.remove_node(node);
            }
        }
    }
    graph
}

proptest! {
    #[test]
    fn store_invariants_hold_under_random_edits(ops in proptest::collection::vec(op_strategy(), 0..80)) {
        let graph = run_ops(&ops);

        // Type safety: every edge joins identical kinds, source to target.
        for (_, edge) in graph.edges() {
            let source = graph.handle(edge.source).expect("edge endpoints are live");
            let target = graph.handle(edge.target).expect("edge endpoints are live");
            prop_assert!(source.is_source());
            prop_assert!(target.is_target());
            prop_assert_eq!(source.kind, target.kind);
        }

        // Cardinality: non-many targets never exceed one incoming edge.
        for (id, handle) in graph.handles() {
            if handle.is_target() && !handle.many {
                prop_assert!(graph.incoming_count(id) <= 1);
            }
        }

        // Cascade integrity: adjacency and edges agree exactly.
        let mut adjacency_edges = 0usize;
        for (id, _) in graph.handles() {
            for edge_id in graph.edges_of(id) {
                let edge = graph.edge(edge_id).expect("adjacency references a live edge");
                prop_assert!(edge.source == id || edge.target == id);
                adjacency_edges += 1;
            }
        }
        // Every edge appears in exactly two adjacency entries.
        prop_assert_eq!(adjacency_edges, graph.edge_count() * 2);

        // Every handle belongs to a live node that lists it.
        for (id, handle) in graph.handles() {
            let node = graph.node(handle.node).expect("owner node is live");
            prop_assert!(node.handles().any(|h| h == id));
        }

        // Direction agreement between nodes and handles.
        for (_, node) in graph.nodes() {
            for &id in node.sources() {
                prop_assert_eq!(graph.handle(id).expect("listed handle is live").direction, HandleDirection::Source);
            }
            for &id in node.targets() {
                prop_assert_eq!(graph.handle(id).expect("listed handle is live").direction, HandleDirection::Target);
            }
        }
    }
}
