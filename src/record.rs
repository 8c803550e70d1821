//! Raw and engineering-unit record types.
//!
//! A [`RawRecord`] holds wire-unit values in the order its layout declares
//! them; an [`EngineeringRecord`] holds the converted physical-unit values
//! (degrees, meters, seconds since epoch, decoded status codes). Batches are
//! ordered sequences; order is arrival order in the byte stream and is
//! semantically significant because it implies sample time order.

use serde::Serialize;

use crate::layout::TelegramLayout;

/// A single decoded numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Value {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bytes([u8; 4]),
}

impl Value {
    /// Numeric value as `f64`. `Bytes` yields `None`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Unsigned(v) => Some(v as f64),
            Value::Signed(v) => Some(v as f64),
            Value::Float(v) => Some(v),
            Value::Bytes(_) => None,
        }
    }

    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::Unsigned(v) => Some(v),
            _ => None,
        }
    }
}

/// One decoded telegram in wire units. Immutable once decoded.
#[derive(Debug, Clone, Serialize)]
pub struct RawRecord {
    pub layout: &'static TelegramLayout,
    values: Vec<Value>,
}

impl RawRecord {
    #[must_use]
    pub fn new(layout: &'static TelegramLayout, values: Vec<Value>) -> Self {
        debug_assert_eq!(layout.fields.len(), values.len());
        RawRecord { layout, values }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.layout.position(name).map(|i| self.values[i])
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

pub type RawBatch = Vec<RawRecord>;

/// Engineering-unit kind of an output field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EngKind {
    Unsigned,
    Signed,
    Float,
}

impl EngKind {
    /// Zero-initialized default for this kind.
    #[must_use]
    pub const fn default_value(self) -> Value {
        match self {
            EngKind::Unsigned => Value::Unsigned(0),
            EngKind::Signed => Value::Signed(0),
            EngKind::Float => Value::Float(0.0),
        }
    }
}

/// One field of an engineering-unit layout.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EngField {
    pub name: &'static str,
    pub kind: EngKind,
}

#[must_use]
pub const fn eng(name: &'static str, kind: EngKind) -> EngField {
    EngField { name, kind }
}

/// One converted telegram in physical units.
///
/// Fields start at their zero-initialized defaults; a wire field with no
/// engineering counterpart is simply skipped during conversion and the
/// engineering field keeps its default.
#[derive(Debug, Clone, Serialize)]
pub struct EngineeringRecord {
    pub fields: &'static [EngField],
    values: Vec<Value>,
}

impl EngineeringRecord {
    /// New record with every field at its default.
    #[must_use]
    pub fn zeroed(fields: &'static [EngField]) -> Self {
        EngineeringRecord {
            fields,
            values: fields.iter().map(|f| f.kind.default_value()).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.position(name).map(|i| self.values[i])
    }

    /// Set the named field, coercing the value into the field's declared
    /// kind. Unknown names are ignored.
    pub fn set(&mut self, name: &str, value: Value) {
        if let Some(i) = self.position(name) {
            self.values[i] = coerce(self.fields[i].kind, value);
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// Cast a value into the engineering kind, mirroring the widening casts the
/// wire-to-engineering copy performs (e.g. i16 centimeter count into f64).
fn coerce(kind: EngKind, value: Value) -> Value {
    match (kind, value) {
        (EngKind::Float, v) => Value::Float(v.as_f64().unwrap_or(0.0)),
        (EngKind::Unsigned, Value::Unsigned(v)) => Value::Unsigned(v),
        (EngKind::Unsigned, Value::Signed(v)) => Value::Unsigned(v as u64),
        (EngKind::Unsigned, Value::Float(v)) => Value::Unsigned(v as u64),
        (EngKind::Signed, Value::Signed(v)) => Value::Signed(v),
        (EngKind::Signed, Value::Unsigned(v)) => Value::Signed(v as i64),
        (EngKind::Signed, Value::Float(v)) => Value::Signed(v as i64),
        (kind, Value::Bytes(_)) => kind.default_value(),
    }
}

pub type EngineeringBatch = Vec<EngineeringRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[EngField] = &[
        eng("status", EngKind::Unsigned),
        eng("roll", EngKind::Float),
        eng("counter", EngKind::Signed),
    ];

    #[test]
    fn zeroed_defaults_follow_kind() {
        let rec = EngineeringRecord::zeroed(FIELDS);
        assert_eq!(rec.get("status"), Some(Value::Unsigned(0)));
        assert_eq!(rec.get("roll"), Some(Value::Float(0.0)));
        assert_eq!(rec.get("counter"), Some(Value::Signed(0)));
    }

    #[test]
    fn set_coerces_into_declared_kind() {
        let mut rec = EngineeringRecord::zeroed(FIELDS);
        rec.set("roll", Value::Signed(-250));
        rec.set("status", Value::Unsigned(144));
        assert_eq!(rec.get("roll"), Some(Value::Float(-250.0)));
        assert_eq!(rec.get("status"), Some(Value::Unsigned(144)));
    }

    #[test]
    fn set_unknown_name_is_ignored() {
        let mut rec = EngineeringRecord::zeroed(FIELDS);
        rec.set("heave", Value::Float(1.0));
        assert_eq!(rec.get("heave"), None);
        assert_eq!(rec.get("roll"), Some(Value::Float(0.0)));
    }
}
