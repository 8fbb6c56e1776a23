//! sw-core: shared primitives for the simwire workspace.
//!
//! Provides:
//! - Generational arena storage and the entity ids used across the wiring graph
//! - The closed value type system (scalar / 2-vector / 3-vector signals)
//! - The `Supplier`/`Receiver` endpoint capabilities consumed by the compiler
//!   and the per-tick executor

pub mod endpoint;
pub mod ids;
pub mod value;

// Re-exports for ergonomics
pub use endpoint::{NullReceiver, Receiver, ReceiverRef, SignalCell, Supplier, SupplierRef};
pub use ids::{Arena, EdgeId, HandleId, Id, NodeId};
pub use value::{Value, ValueKind, aggregate};
