//! Compiled flows and the per-tick executor.

use core::fmt;

use sw_core::{ReceiverRef, SupplierRef};
use tracing::{debug, warn};

/// One executable per-tick value transfer: read the supplier, write the
/// receiver.
pub struct Flow {
    pub supplier: SupplierRef,
    pub receiver: ReceiverRef,
}

impl Flow {
    pub fn new(supplier: SupplierRef, receiver: ReceiverRef) -> Self {
        Self { supplier, receiver }
    }
}

impl fmt::Debug for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flow")
            .field("supplier_kind", &self.supplier.kind())
            .field("receiver_kind", &self.receiver.kind())
            .finish()
    }
}

/// Execute every flow once, in order.
///
/// This is the simulation loop's hot path: a flat pass over the compiled
/// list, no graph traversal. The list must not change for the duration of
/// one tick.
pub fn run_tick(flows: &[Flow]) {
    for flow in flows {
        flow.receiver.write(flow.supplier.read());
    }
}

/// Holder of the active flow program.
///
/// Recompilation happens on the editing side and is swapped in between
/// ticks; a failed compile keeps the previously-compiled program in effect
/// (stale-but-valid) rather than disabling simulation I/O.
#[derive(Debug, Default)]
pub struct FlowBank {
    active: Vec<Flow>,
}

impl FlowBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a compile result. Returns `true` if the program changed.
    pub fn install<E: fmt::Display>(&mut self, compiled: Result<Vec<Flow>, E>) -> bool {
        match compiled {
            Ok(flows) => {
                debug!(flows = flows.len(), "installing flow program");
                self.active = flows;
                true
            }
            Err(error) => {
                warn!(%error, "compile failed; keeping previous flow program");
                false
            }
        }
    }

    /// The active program.
    pub fn flows(&self) -> &[Flow] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Run one simulation step over the active program.
    pub fn tick(&self) {
        run_tick(&self.active);
    }
}
