//! Wire layout descriptions for fixed-width sensor telegrams.
//!
//! A telegram is one fixed-width binary record emitted by a motion or
//! navigation sensor. Its layout is an ordered field schema; the total record
//! width is always known in advance, there are no variable-length telegrams.

use serde::Serialize;

/// Byte order of a single wire field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Endian {
    Big,
    Little,
}

/// Numeric kind and width of a single wire field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    U8,
    U16,
    U32,
    I16,
    I32,
    F32,
    F64,
    /// Four raw bytes, used for ASCII id markers such as `#KMB`.
    Ascii4,
}

impl FieldKind {
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            FieldKind::U8 => 1,
            FieldKind::U16 | FieldKind::I16 => 2,
            FieldKind::U32 | FieldKind::I32 | FieldKind::F32 | FieldKind::Ascii4 => 4,
            FieldKind::F64 => 8,
        }
    }
}

/// One field of a telegram layout.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub endian: Endian,
}

/// Big-endian field.
#[must_use]
pub const fn be(name: &'static str, kind: FieldKind) -> Field {
    Field {
        name,
        kind,
        endian: Endian::Big,
    }
}

/// Little-endian field.
#[must_use]
pub const fn le(name: &'static str, kind: FieldKind) -> Field {
    Field {
        name,
        kind,
        endian: Endian::Little,
    }
}

/// Ordered field schema of one telegram format.
///
/// Field names are unique within a layout. Layouts are registered once at
/// startup and are read-only for the process lifetime.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TelegramLayout {
    pub fields: &'static [Field],
}

impl TelegramLayout {
    /// Fixed byte width of one telegram under this layout.
    #[must_use]
    pub fn record_len(&self) -> usize {
        self.fields.iter().map(|f| f.kind.width()).sum()
    }

    /// Index of the named field, if present.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: TelegramLayout = TelegramLayout {
        fields: &[
            le("status", FieldKind::U8),
            le("roll", FieldKind::I16),
            be("lat", FieldKind::I32),
            le("height", FieldKind::F64),
        ],
    };

    #[test]
    fn record_len_sums_field_widths() {
        assert_eq!(LAYOUT.record_len(), 1 + 2 + 4 + 8);
    }

    #[test]
    fn position_lookup() {
        assert_eq!(LAYOUT.position("lat"), Some(2));
        assert_eq!(LAYOUT.position("nope"), None);
    }
}
