//! The graph → flow-program compiler.
//!
//! `compile` walks every wired target on the robot-IO and sim-input
//! anchors, resolves external endpoints through the backend traits, and
//! recurses through structural function nodes. The walk carries a
//! call-scoped `encountered` set as a recursion-stack membership check:
//! a source handle is inserted before descending through it and removed
//! after, so diamond-shaped sharing is compiled on every branch while a
//! true cycle is skipped at the point of re-entry.

use std::collections::HashSet;

use sw_core::{HandleId, NodeId, NullReceiver, ReceiverRef, SupplierRef};
use sw_devices::RobotIoBackend;
use sw_graph::{AnchorKind, FunctionKind, Graph, Handle, HandleOrigin, Node, NodeRole};
use sw_sim::{Flow, SimulationLayer};
use tracing::{debug, trace};

use crate::error::{CompileError, CompileResult};
use crate::synth::{AggregateSupplier, ComposeSupplier, IndexSupplier};

/// Compile the wiring graph into a flat flow program.
///
/// One flow is emitted per enabled, wired target handle on the robot-IO
/// and sim-input anchors. The graph is borrowed read-only and the result
/// holds no references into it. Any failure aborts the entire pass.
pub fn compile(
    graph: &Graph,
    rio: &dyn RobotIoBackend,
    sim: &dyn SimulationLayer,
) -> CompileResult<Vec<Flow>> {
    let compiler = Compiler { graph, rio, sim };
    let mut flows = Vec::new();

    for anchor in [AnchorKind::RobotIo, AnchorKind::SimInput] {
        let Some(node_id) = graph.anchor(anchor) else {
            continue;
        };
        let Some(node) = graph.node(node_id) else {
            continue;
        };
        for &target in node.targets() {
            let handle = compiler.handle(target)?;
            if !handle.enabled || graph.incoming_count(target) == 0 {
                continue;
            }
            let mut encountered = HashSet::new();
            flows.push(compiler.compile_target(target, &mut encountered)?);
        }
    }

    debug!(flows = flows.len(), "compiled flow program");
    Ok(flows)
}

struct Compiler<'a> {
    graph: &'a Graph,
    rio: &'a dyn RobotIoBackend,
    sim: &'a dyn SimulationLayer,
}

impl Compiler<'_> {
    fn handle(&self, id: HandleId) -> CompileResult<&Handle> {
        self.graph
            .handle(id)
            .ok_or(CompileError::DanglingHandle { handle: id })
    }

    fn node(&self, id: NodeId) -> CompileResult<&Node> {
        self.graph
            .node(id)
            .ok_or(CompileError::DanglingNode { node: id })
    }

    /// Pair one target handle with its receiver and compiled supplier.
    fn compile_target(
        &self,
        target: HandleId,
        encountered: &mut HashSet<HandleId>,
    ) -> CompileResult<Flow> {
        let receiver = self.resolve_receiver(target)?;
        let supplier = self.supplier_for_target(target, encountered)?;
        Ok(Flow::new(supplier, receiver))
    }

    /// Resolve a target handle's write endpoint from its origin.
    fn resolve_receiver(&self, target: HandleId) -> CompileResult<ReceiverRef> {
        let handle = self.handle(target)?;
        match &handle.origin {
            Some(HandleOrigin::Device {
                category,
                device_id,
            }) => self.rio.receiver(*category, device_id).ok_or_else(|| {
                CompileError::UnresolvedReceiver {
                    what: format!("{category} {device_id}"),
                }
            }),
            Some(HandleOrigin::Driver { driver_id }) => {
                self.sim
                    .driver(driver_id)
                    .ok_or_else(|| CompileError::UnresolvedReceiver {
                        what: format!("driver {driver_id}"),
                    })
            }
            // Structural targets have no external destination.
            _ => Ok(NullReceiver::new(handle.kind)),
        }
    }

    /// Compile the single supplier feeding a target handle.
    ///
    /// Multiple resolved inputs are legal only for aggregable kinds and are
    /// wrapped behind one summing supplier.
    fn supplier_for_target(
        &self,
        target: HandleId,
        encountered: &mut HashSet<HandleId>,
    ) -> CompileResult<SupplierRef> {
        let handle = self.handle(target)?;
        let incoming: Vec<_> = self.graph.incoming(target).collect();
        if incoming.len() > 1 && !handle.kind.is_aggregable() {
            return Err(CompileError::AmbiguousFanIn {
                handle: target,
                kind: handle.kind,
            });
        }

        let mut suppliers = Vec::new();
        for edge_id in incoming {
            let Some(edge) = self.graph.edge(edge_id) else {
                continue;
            };
            let source = edge.source;
            let source_handle = self.handle(source)?;
            // A kind-mismatched edge cannot contribute a value.
            if source_handle.kind != handle.kind {
                trace!(%source, %target, "skipping kind-mismatched edge");
                continue;
            }
            // Cycle guard: skip a source already on the recursion stack.
            if !encountered.insert(source) {
                trace!(%source, "breaking reference cycle");
                continue;
            }
            let resolved = self.resolve_supplier(source, encountered);
            encountered.remove(&source);
            suppliers.push(resolved?);
        }

        match suppliers.len() {
            0 => Err(CompileError::NoSupplier { handle: target }),
            1 => Ok(suppliers.swap_remove(0)),
            _ => Ok(AggregateSupplier::new(handle.kind, suppliers)),
        }
    }

    /// Resolve a source handle's read endpoint from its origin, recursing
    /// into structural function nodes.
    fn resolve_supplier(
        &self,
        source: HandleId,
        encountered: &mut HashSet<HandleId>,
    ) -> CompileResult<SupplierRef> {
        let handle = self.handle(source)?;
        match &handle.origin {
            Some(HandleOrigin::Device {
                category,
                device_id,
            }) => self.rio.supplier(*category, device_id).ok_or_else(|| {
                CompileError::UnresolvedSupplier {
                    what: format!("{category} {device_id}"),
                }
            }),
            Some(HandleOrigin::Stimulus { stimulus_id }) => self
                .sim
                .stimulus(stimulus_id)
                .ok_or_else(|| CompileError::UnresolvedSupplier {
                    what: format!("stimulus {stimulus_id}"),
                }),
            Some(HandleOrigin::Driver { driver_id }) => {
                Err(CompileError::UnresolvedSupplier {
                    what: format!("driver {driver_id} cannot supply values"),
                })
            }
            None => self.function_supplier(source, handle.node, encountered),
        }
    }

    /// Compile the function node behind one of its source handles.
    fn function_supplier(
        &self,
        out_handle: HandleId,
        node_id: NodeId,
        encountered: &mut HashSet<HandleId>,
    ) -> CompileResult<SupplierRef> {
        let node = self.node(node_id)?;
        let function = match node.role {
            NodeRole::Function(kind) => kind,
            // An anchor handle with no origin maps to nothing external.
            NodeRole::Anchor(_) => {
                return Err(CompileError::UnresolvedSupplier {
                    what: format!("handle {out_handle} has no origin"),
                });
            }
        };

        match function {
            FunctionKind::Junction => {
                if node.sources().len() != 1 || node.targets().len() != 1 {
                    return Err(bad_arity(node_id, function, node));
                }
                self.supplier_for_target(node.targets()[0], encountered)
            }
            FunctionKind::Constructor => {
                if node.sources().len() != 1 || node.targets().is_empty() {
                    return Err(bad_arity(node_id, function, node));
                }
                let out = self.handle(node.sources()[0])?;
                let parts = out
                    .kind
                    .decompose()
                    .ok_or(CompileError::NoDecomposition { kind: out.kind })?;
                if node.targets().len() != parts.len() {
                    return Err(bad_arity(node_id, function, node));
                }
                let mut part_suppliers = Vec::with_capacity(parts.len());
                for &part in node.targets() {
                    part_suppliers.push(self.supplier_for_target(part, encountered)?);
                }
                Ok(ComposeSupplier::new(out.kind, part_suppliers))
            }
            FunctionKind::Deconstructor => {
                if node.targets().len() != 1 || node.sources().is_empty() {
                    return Err(bad_arity(node_id, function, node));
                }
                let input = self.handle(node.targets()[0])?;
                input
                    .kind
                    .decompose()
                    .ok_or(CompileError::NoDecomposition { kind: input.kind })?;
                let index = node
                    .sources()
                    .iter()
                    .position(|&s| s == out_handle)
                    .ok_or(CompileError::DanglingHandle { handle: out_handle })?;
                let composite = self.supplier_for_target(node.targets()[0], encountered)?;
                Ok(IndexSupplier::new(composite, index))
            }
        }
    }
}

fn bad_arity(node_id: NodeId, function: FunctionKind, node: &Node) -> CompileError {
    CompileError::BadArity {
        node: node_id,
        function,
        sources: node.sources().len(),
        targets: node.targets().len(),
    }
}
