//! Zero-value detection.

use crate::types::Value;

/// Whether `value` is the default value of its type.
///
/// Handles (pointer, sequence, map, channel, interface) are zero only when
/// unset; an allocated but empty container is not. Values that do not
/// support equality are never zero.
pub fn is_zero(value: &Value) -> bool {
    match value {
        Value::Pointer(p) | Value::Interface(p) => p.is_none(),
        Value::Sequence(s) => s.is_none(),
        Value::Map(m) => m.is_none(),
        Value::Channel(c) => c.is_none(),
        v if !v.is_comparable() => false,
        v => equals_zero(v),
    }
}

/// Equality against the default, for comparable values.
fn equals_zero(value: &Value) -> bool {
    match value {
        Value::Bool(b) => !b,
        Value::Int(i) => *i == 0,
        Value::Uint(u) => *u == 0,
        Value::Float(f) => *f == 0.0,
        Value::Char(c) => *c == '\0',
        Value::Str(s) => s.is_empty(),
        Value::Pointer(p) | Value::Interface(p) => p.is_none(),
        Value::Channel(c) => c.is_none(),
        Value::Struct(fields) => fields.iter().all(|(_, v)| equals_zero(v)),
        Value::Sequence(_) | Value::Map(_) | Value::Function(_) => false,
    }
}
