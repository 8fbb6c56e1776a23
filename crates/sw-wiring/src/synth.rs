//! Synthetic suppliers the compiler wraps around resolved endpoints.

use std::sync::Arc;

use sw_core::{Supplier, SupplierRef, Value, ValueKind, aggregate};

/// Sums several same-kind suppliers at read time.
///
/// Compiled in front of a `many` target with more than one incoming edge.
pub(crate) struct AggregateSupplier {
    kind: ValueKind,
    inputs: Vec<SupplierRef>,
}

impl AggregateSupplier {
    pub(crate) fn new(kind: ValueKind, inputs: Vec<SupplierRef>) -> SupplierRef {
        Arc::new(Self { kind, inputs })
    }
}

impl Supplier for AggregateSupplier {
    fn kind(&self) -> ValueKind {
        self.kind
    }

    fn read(&self) -> Value {
        let values: Vec<Value> = self.inputs.iter().map(|input| input.read()).collect();
        // The compiler only aggregates aggregable, kind-matched inputs.
        aggregate(self.kind, &values).unwrap_or(Value::Scalar(0.0))
    }
}

/// Gathers scalar part suppliers into one composite value at read time.
///
/// Compiled behind a constructor node's composite source.
pub(crate) struct ComposeSupplier {
    kind: ValueKind,
    parts: Vec<SupplierRef>,
}

impl ComposeSupplier {
    pub(crate) fn new(kind: ValueKind, parts: Vec<SupplierRef>) -> SupplierRef {
        Arc::new(Self { kind, parts })
    }
}

impl Supplier for ComposeSupplier {
    fn kind(&self) -> ValueKind {
        self.kind
    }

    fn read(&self) -> Value {
        let parts: Vec<f64> = self
            .parts
            .iter()
            .map(|part| part.read().component(0).unwrap_or(0.0))
            .collect();
        // Part count is pinned to the kind's decomposed arity at compile
        // time.
        Value::compose(self.kind, &parts).unwrap_or(Value::Scalar(0.0))
    }
}

/// Selects one scalar component out of a composite supplier at read time.
///
/// Compiled behind each part source of a deconstructor node.
pub(crate) struct IndexSupplier {
    composite: SupplierRef,
    index: usize,
}

impl IndexSupplier {
    pub(crate) fn new(composite: SupplierRef, index: usize) -> SupplierRef {
        Arc::new(Self { composite, index })
    }
}

impl Supplier for IndexSupplier {
    fn kind(&self) -> ValueKind {
        ValueKind::Scalar
    }

    fn read(&self) -> Value {
        Value::Scalar(self.composite.read().component(self.index).unwrap_or(0.0))
    }
}
