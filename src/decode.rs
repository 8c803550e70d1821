//! Fixed-width telegram decoding.

use crate::layout::{Endian, Field, FieldKind, TelegramLayout};
use crate::record::{RawBatch, RawRecord, Value};
use crate::{Error, Result};

/// Decode a buffer of back-to-back fixed-width telegrams into a raw batch.
///
/// The buffer is interpreted left to right, one record per `record_len()`
/// slice, each field per its declared width, endianness and numeric kind.
/// Record order in the batch is arrival order in the buffer.
///
/// # Errors
/// [`Error::MalformedInput`] if the buffer length is not an exact positive
/// multiple of the layout's record width. Partial telegrams are never
/// silently truncated.
pub fn decode(buf: &[u8], layout: &'static TelegramLayout) -> Result<RawBatch> {
    let record_len = layout.record_len();
    if buf.is_empty() || buf.len() % record_len != 0 {
        return Err(Error::MalformedInput {
            actual: buf.len(),
            expected: record_len,
        });
    }

    let mut batch = Vec::with_capacity(buf.len() / record_len);
    for chunk in buf.chunks_exact(record_len) {
        let mut values = Vec::with_capacity(layout.fields.len());
        let mut offset = 0;
        for field in layout.fields {
            let width = field.kind.width();
            values.push(decode_field(field, &chunk[offset..offset + width]));
            offset += width;
        }
        batch.push(RawRecord::new(layout, values));
    }
    Ok(batch)
}

fn decode_field(field: &Field, b: &[u8]) -> Value {
    match (field.kind, field.endian) {
        (FieldKind::U8, _) => Value::Unsigned(u64::from(b[0])),
        (FieldKind::U16, Endian::Big) => Value::Unsigned(u64::from(u16::from_be_bytes([b[0], b[1]]))),
        (FieldKind::U16, Endian::Little) => {
            Value::Unsigned(u64::from(u16::from_le_bytes([b[0], b[1]])))
        }
        (FieldKind::U32, Endian::Big) => {
            Value::Unsigned(u64::from(u32::from_be_bytes([b[0], b[1], b[2], b[3]])))
        }
        (FieldKind::U32, Endian::Little) => {
            Value::Unsigned(u64::from(u32::from_le_bytes([b[0], b[1], b[2], b[3]])))
        }
        (FieldKind::I16, Endian::Big) => Value::Signed(i64::from(i16::from_be_bytes([b[0], b[1]]))),
        (FieldKind::I16, Endian::Little) => {
            Value::Signed(i64::from(i16::from_le_bytes([b[0], b[1]])))
        }
        (FieldKind::I32, Endian::Big) => {
            Value::Signed(i64::from(i32::from_be_bytes([b[0], b[1], b[2], b[3]])))
        }
        (FieldKind::I32, Endian::Little) => {
            Value::Signed(i64::from(i32::from_le_bytes([b[0], b[1], b[2], b[3]])))
        }
        (FieldKind::F32, Endian::Big) => {
            Value::Float(f64::from(f32::from_be_bytes([b[0], b[1], b[2], b[3]])))
        }
        (FieldKind::F32, Endian::Little) => {
            Value::Float(f64::from(f32::from_le_bytes([b[0], b[1], b[2], b[3]])))
        }
        (FieldKind::F64, Endian::Big) => Value::Float(f64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ])),
        (FieldKind::F64, Endian::Little) => Value::Float(f64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ])),
        (FieldKind::Ascii4, _) => Value::Bytes([b[0], b[1], b[2], b[3]]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{be, le};
    use test_case::test_case;

    const LAYOUT: TelegramLayout = TelegramLayout {
        fields: &[
            le("status", FieldKind::U8),
            be("roll", FieldKind::I16),
            le("heading", FieldKind::U16),
            be("lat", FieldKind::I32),
        ],
    };

    #[test]
    fn decodes_fields_per_endianness() {
        #[rustfmt::skip]
        let buf: &[u8] = &[
            0x90,                   // status = 144
            0xff, 0x38,             // roll = -200 big-endian
            0x10, 0x27,             // heading = 10000 little-endian
            0x00, 0x00, 0x01, 0x00, // lat = 256 big-endian
        ];
        let batch = decode(buf, &LAYOUT).unwrap();
        assert_eq!(batch.len(), 1);
        let rec = &batch[0];
        assert_eq!(rec.get("status"), Some(Value::Unsigned(144)));
        assert_eq!(rec.get("roll"), Some(Value::Signed(-200)));
        assert_eq!(rec.get("heading"), Some(Value::Unsigned(10000)));
        assert_eq!(rec.get("lat"), Some(Value::Signed(256)));
    }

    #[test]
    fn preserves_record_order() {
        let mut buf = Vec::new();
        for i in 0..5u8 {
            buf.extend_from_slice(&[i, 0, 0, 0, 0, 0, 0, 0, 0]);
        }
        let batch = decode(&buf, &LAYOUT).unwrap();
        assert_eq!(batch.len(), 5);
        for (i, rec) in batch.iter().enumerate() {
            assert_eq!(rec.get("status"), Some(Value::Unsigned(i as u64)));
        }
    }

    #[test_case(1)]
    #[test_case(8)]
    #[test_case(10)]
    #[test_case(17)]
    fn non_multiple_length_is_malformed(len: usize) {
        let buf = vec![0u8; len];
        match decode(&buf, &LAYOUT) {
            Err(Error::MalformedInput { actual, expected }) => {
                assert_eq!(actual, len);
                assert_eq!(expected, 9);
            }
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn empty_buffer_is_malformed() {
        assert!(matches!(
            decode(&[], &LAYOUT),
            Err(Error::MalformedInput { .. })
        ));
    }

    #[test]
    fn decodes_captured_hex_record() {
        let buf = hex::decode("900102030400000001").unwrap();
        let batch = decode(&buf, &LAYOUT).unwrap();
        let rec = &batch[0];
        assert_eq!(rec.get("status"), Some(Value::Unsigned(0x90)));
        assert_eq!(rec.get("roll"), Some(Value::Signed(0x0102)));
        assert_eq!(rec.get("heading"), Some(Value::Unsigned(0x0403)));
        assert_eq!(rec.get("lat"), Some(Value::Signed(1)));
    }

    #[test]
    fn float_fields() {
        const FLOATS: TelegramLayout = TelegramLayout {
            fields: &[be("f", FieldKind::F32), le("d", FieldKind::F64)],
        };
        let mut buf = Vec::new();
        buf.extend_from_slice(&1.5f32.to_be_bytes());
        buf.extend_from_slice(&(-2.25f64).to_le_bytes());
        let batch = decode(&buf, &FLOATS).unwrap();
        assert_eq!(batch[0].get("f"), Some(Value::Float(1.5)));
        assert_eq!(batch[0].get("d"), Some(Value::Float(-2.25)));
    }
}
