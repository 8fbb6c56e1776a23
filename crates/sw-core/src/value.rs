//! Signal value kinds and payloads.
//!
//! Every connection point in the wiring graph carries exactly one
//! [`ValueKind`], and an edge may only join two points of identical kind.
//! Payloads are a closed tagged union so kind mismatches are caught by the
//! type checker rather than at tick time.

use nalgebra::{Vector2, Vector3};

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of value a connection point produces or consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueKind {
    /// Single `f64` signal (motor duty, encoder count, channel value).
    Scalar,
    /// Two-component vector signal.
    Vector2,
    /// Three-component vector signal (e.g. accelerometer axes).
    Vector3,
    /// Kind not yet determined; connects to nothing.
    Unknown,
}

impl ValueKind {
    /// Ordered scalar sub-kinds of a composite kind.
    ///
    /// Returns `None` for kinds with no defined decomposition, including
    /// `Scalar` itself and `Unknown`.
    pub fn decompose(self) -> Option<&'static [ValueKind]> {
        match self {
            ValueKind::Vector2 => Some(&[ValueKind::Scalar, ValueKind::Scalar]),
            ValueKind::Vector3 => Some(&[ValueKind::Scalar, ValueKind::Scalar, ValueKind::Scalar]),
            ValueKind::Scalar | ValueKind::Unknown => None,
        }
    }

    /// True only for kinds with a commutative combining rule.
    ///
    /// Scalars combine by numeric sum; no other kind defines a combination,
    /// so many-to-one fan-in is only permitted into scalar targets.
    pub fn is_aggregable(self) -> bool {
        matches!(self, ValueKind::Scalar)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Scalar => "scalar",
            ValueKind::Vector2 => "vector2",
            ValueKind::Vector3 => "vector3",
            ValueKind::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// A signal value moving through a compiled flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Scalar(f64),
    Vector2(Vector2<f64>),
    Vector3(Vector3<f64>),
}

impl Value {
    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Scalar(_) => ValueKind::Scalar,
            Value::Vector2(_) => ValueKind::Vector2,
            Value::Vector3(_) => ValueKind::Vector3,
        }
    }

    /// The zero value of a kind, if the kind has a payload at all.
    pub fn zero(kind: ValueKind) -> Option<Value> {
        match kind {
            ValueKind::Scalar => Some(Value::Scalar(0.0)),
            ValueKind::Vector2 => Some(Value::Vector2(Vector2::zeros())),
            ValueKind::Vector3 => Some(Value::Vector3(Vector3::zeros())),
            ValueKind::Unknown => None,
        }
    }

    /// The scalar payload, if this is a scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(x) => Some(*x),
            _ => None,
        }
    }

    /// Index into the value's scalar components.
    ///
    /// A scalar exposes itself at index 0; vectors expose their components
    /// in decomposition order.
    pub fn component(&self, index: usize) -> Option<f64> {
        match self {
            Value::Scalar(x) if index == 0 => Some(*x),
            Value::Vector2(v) => v.get(index).copied(),
            Value::Vector3(v) => v.get(index).copied(),
            _ => None,
        }
    }

    /// Rebuild a composite value from its scalar parts.
    ///
    /// Defined only for kinds with a decomposition; the part count must
    /// match the decomposed arity exactly.
    pub fn compose(kind: ValueKind, parts: &[f64]) -> Option<Value> {
        match kind {
            ValueKind::Vector2 if parts.len() == 2 => {
                Some(Value::Vector2(Vector2::new(parts[0], parts[1])))
            }
            ValueKind::Vector3 if parts.len() == 3 => {
                Some(Value::Vector3(Vector3::new(parts[0], parts[1], parts[2])))
            }
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(value)
    }
}

/// Combine several same-kind values into one.
///
/// Defined only when the kind is aggregable and every value matches it;
/// returns `None` on an empty slice, a kind mismatch, or a non-aggregable
/// kind.
pub fn aggregate(kind: ValueKind, values: &[Value]) -> Option<Value> {
    if !kind.is_aggregable() || values.is_empty() {
        return None;
    }
    let mut sum = 0.0;
    for value in values {
        sum += value.as_scalar()?;
    }
    Some(Value::Scalar(sum))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decompose_table() {
        assert_eq!(ValueKind::Scalar.decompose(), None);
        assert_eq!(ValueKind::Unknown.decompose(), None);
        assert_eq!(ValueKind::Vector2.decompose().map(|p| p.len()), Some(2));
        assert_eq!(ValueKind::Vector3.decompose().map(|p| p.len()), Some(3));
        for part in ValueKind::Vector3.decompose().unwrap() {
            assert_eq!(*part, ValueKind::Scalar);
        }
    }

    #[test]
    fn only_scalars_aggregate() {
        assert!(ValueKind::Scalar.is_aggregable());
        assert!(!ValueKind::Vector2.is_aggregable());
        assert!(!ValueKind::Vector3.is_aggregable());
        assert!(!ValueKind::Unknown.is_aggregable());
    }

    #[test]
    fn aggregate_sums_scalars() {
        let values = [Value::Scalar(1.5), Value::Scalar(-0.5), Value::Scalar(2.0)];
        assert_eq!(
            aggregate(ValueKind::Scalar, &values),
            Some(Value::Scalar(3.0))
        );
    }

    #[test]
    fn aggregate_rejects_misuse() {
        assert_eq!(aggregate(ValueKind::Scalar, &[]), None);
        assert_eq!(
            aggregate(ValueKind::Vector3, &[Value::Vector3(Vector3::zeros())]),
            None
        );
        assert_eq!(
            aggregate(
                ValueKind::Scalar,
                &[Value::Scalar(1.0), Value::Vector2(Vector2::zeros())]
            ),
            None
        );
    }

    #[test]
    fn compose_component_round_trip() {
        let v = Value::compose(ValueKind::Vector3, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(v.kind(), ValueKind::Vector3);
        assert_eq!(v.component(0), Some(1.0));
        assert_eq!(v.component(1), Some(2.0));
        assert_eq!(v.component(2), Some(3.0));
        assert_eq!(v.component(3), None);
    }

    #[test]
    fn compose_requires_exact_arity() {
        assert_eq!(Value::compose(ValueKind::Vector2, &[1.0]), None);
        assert_eq!(Value::compose(ValueKind::Scalar, &[1.0]), None);
        assert_eq!(Value::compose(ValueKind::Unknown, &[]), None);
    }

    #[test]
    fn scalar_indexes_as_itself() {
        assert_eq!(Value::Scalar(4.0).component(0), Some(4.0));
        assert_eq!(Value::Scalar(4.0).component(1), None);
    }
}
