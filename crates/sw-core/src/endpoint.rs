//! Supplier/receiver endpoint capabilities.
//!
//! A compiled flow pairs one supplier (read side) with one receiver (write
//! side). Device emulation, the physics layer, and the compiler's synthetic
//! adapters all meet at these two traits.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::value::{Value, ValueKind};

/// Read-only value endpoint.
pub trait Supplier: Send + Sync {
    /// Kind of value this endpoint produces.
    fn kind(&self) -> ValueKind;

    /// Read the current value.
    fn read(&self) -> Value;
}

/// Write-only value endpoint.
pub trait Receiver: Send + Sync {
    /// Kind of value this endpoint consumes.
    fn kind(&self) -> ValueKind;

    /// Write a value into the endpoint.
    fn write(&self, value: Value);
}

/// Shared supplier handle.
pub type SupplierRef = Arc<dyn Supplier>;

/// Shared receiver handle.
pub type ReceiverRef = Arc<dyn Receiver>;

/// Receiver that discards every write.
///
/// Structural targets with no external destination compile to this.
pub struct NullReceiver {
    kind: ValueKind,
}

impl NullReceiver {
    pub fn new(kind: ValueKind) -> ReceiverRef {
        Arc::new(Self { kind })
    }
}

impl Receiver for NullReceiver {
    fn kind(&self) -> ValueKind {
        self.kind
    }

    fn write(&self, _value: Value) {}
}

/// Shared mutable signal storage.
///
/// One cell backs one emulated device channel or one loopback driver or
/// stimulus: the producing side writes through [`Receiver`], the consuming
/// side reads through [`Supplier`]. The kind is fixed at construction and
/// mismatched writes are dropped.
pub struct SignalCell {
    kind: ValueKind,
    value: Mutex<Value>,
}

impl SignalCell {
    /// Create a cell holding `initial`; the cell's kind is the value's kind.
    pub fn new(initial: Value) -> Arc<Self> {
        Arc::new(Self {
            kind: initial.kind(),
            value: Mutex::new(initial),
        })
    }

    /// Create a zero-initialized scalar cell.
    pub fn scalar() -> Arc<Self> {
        Self::new(Value::Scalar(0.0))
    }

    pub fn cell_kind(&self) -> ValueKind {
        self.kind
    }

    /// Current value.
    pub fn get(&self) -> Value {
        *self.lock()
    }

    /// Store a value of the cell's kind; other kinds are dropped.
    pub fn set(&self, value: Value) {
        if value.kind() == self.kind {
            *self.lock() = value;
        }
    }

    fn lock(&self) -> MutexGuard<'_, Value> {
        // A poisoned lock still guards a valid Value; recover it.
        match self.value.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Supplier for SignalCell {
    fn kind(&self) -> ValueKind {
        self.kind
    }

    fn read(&self) -> Value {
        self.get()
    }
}

impl Receiver for SignalCell {
    fn kind(&self) -> ValueKind {
        self.kind
    }

    fn write(&self, value: Value) {
        self.set(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn cell_round_trip() {
        let cell = SignalCell::scalar();
        assert_eq!(cell.get(), Value::Scalar(0.0));
        cell.set(Value::Scalar(0.75));
        assert_eq!(cell.get(), Value::Scalar(0.75));
    }

    #[test]
    fn cell_drops_mismatched_kind() {
        let cell = SignalCell::scalar();
        cell.set(Value::Vector3(Vector3::new(1.0, 2.0, 3.0)));
        assert_eq!(cell.get(), Value::Scalar(0.0));
    }

    #[test]
    fn cell_as_endpoints() {
        let cell = SignalCell::new(Value::Vector3(Vector3::zeros()));
        let supplier: SupplierRef = cell.clone();
        let receiver: ReceiverRef = cell;

        receiver.write(Value::Vector3(Vector3::new(0.1, 0.2, 0.3)));
        assert_eq!(supplier.kind(), ValueKind::Vector3);
        assert_eq!(supplier.read(), Value::Vector3(Vector3::new(0.1, 0.2, 0.3)));
    }

    #[test]
    fn null_receiver_ignores_writes() {
        let receiver = NullReceiver::new(ValueKind::Scalar);
        assert_eq!(receiver.kind(), ValueKind::Scalar);
        receiver.write(Value::Scalar(5.0));
    }
}
