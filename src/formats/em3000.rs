//! Simrad EM3000 attitude telegram.
//!
//! An early Simrad Horten format for subsea equipment, considered deprecated:
//! it carries neither a timestamp nor a checksum. Absolute time can only be
//! approximated afterwards via fixed-interval extrapolation from a caller
//! supplied time basis.

use super::{raw_f64, FormatSpec, FormatTag, CM};
use crate::layout::{le, FieldKind, TelegramLayout};
use crate::record::{eng, EngField, EngKind, EngineeringRecord, RawBatch, RawRecord, Value};
use crate::time::TimeStrategy;

static WIRE: TelegramLayout = TelegramLayout {
    fields: &[
        le("status", FieldKind::U8),
        le("header", FieldKind::U8),
        le("roll", FieldKind::I16),
        le("pitch", FieldKind::I16),
        le("heave", FieldKind::I16),
        le("heading", FieldKind::U16),
    ],
};

static ENGINEERING: [EngField; 7] = [
    eng("status", EngKind::Unsigned),
    eng("header", EngKind::Unsigned),
    eng("roll", EngKind::Float),
    eng("pitch", EngKind::Float),
    eng("heave", EngKind::Float),
    eng("heading", EngKind::Float),
    eng("utc_time", EngKind::Float),
];

/// Raw status codes remapped to the engineering status set. Values outside
/// the table pass through unchanged.
const STATUS_REMAP: [(u64, u64); 3] = [(144, 0), (145, 1), (160, 2)];

/// The only value the status byte takes in a healthy stream; the detection
/// invariant checks for it in every probed record. This is a weak invariant
/// (a colliding format could pass) but is kept for compatibility.
pub(crate) const STATUS_SENTINEL: u64 = 144;

fn convert(raw: &RawRecord, out: &mut EngineeringRecord) {
    for name in ["roll", "pitch", "heave", "heading"] {
        if let Some(v) = raw_f64(raw, name) {
            out.set(name, Value::Float(v * CM));
        }
    }
    if let Some(Value::Unsigned(code)) = out.get("status") {
        if let Some(&(_, mapped)) = STATUS_REMAP.iter().find(|&&(from, _)| from == code) {
            out.set("status", Value::Unsigned(mapped));
        }
    }
}

fn probe(batch: &RawBatch) -> bool {
    batch
        .iter()
        .all(|r| r.get("status") == Some(Value::Unsigned(STATUS_SENTINEL)))
}

pub(crate) static SPEC: FormatSpec = FormatSpec {
    tag: FormatTag::Em3000,
    wire: &WIRE,
    engineering: &ENGINEERING,
    time: TimeStrategy::FixedInterval { dest: "utc_time" },
    convert_record: convert,
    probe: Some(probe),
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode;
    use test_case::test_case;

    fn telegram(status: u8, roll: i16, pitch: i16, heave: i16, heading: u16) -> Vec<u8> {
        let mut buf = vec![status, 0x00];
        buf.extend_from_slice(&roll.to_le_bytes());
        buf.extend_from_slice(&pitch.to_le_bytes());
        buf.extend_from_slice(&heave.to_le_bytes());
        buf.extend_from_slice(&heading.to_le_bytes());
        buf
    }

    #[test]
    fn converts_centidegrees_and_centimeters() {
        let buf = telegram(144, -250, 125, -42, 18000);
        let raw = decode(&buf, &WIRE).unwrap();
        let eng = SPEC.convert(&raw);

        let rec = &eng[0];
        assert_eq!(rec.get("roll"), Some(Value::Float(-2.5)));
        assert_eq!(rec.get("pitch"), Some(Value::Float(1.25)));
        let heave = rec.get("heave").unwrap().as_f64().unwrap();
        assert!((heave + 0.42).abs() < 1e-9);
        assert_eq!(rec.get("heading"), Some(Value::Float(180.0)));
        // no native time; stays at default until reconstruction
        assert_eq!(rec.get("utc_time"), Some(Value::Float(0.0)));
    }

    #[test_case(144, 0)]
    #[test_case(145, 1)]
    #[test_case(160, 2)]
    fn status_remap(raw_status: u8, expected: u64) {
        let buf = telegram(raw_status, 0, 0, 0, 0);
        let raw = decode(&buf, &WIRE).unwrap();
        let eng = SPEC.convert(&raw);
        assert_eq!(eng[0].get("status"), Some(Value::Unsigned(expected)));
    }

    #[test_case(0)]
    #[test_case(7)]
    #[test_case(200)]
    fn unknown_status_passes_through(raw_status: u8) {
        let buf = telegram(raw_status, 0, 0, 0, 0);
        let raw = decode(&buf, &WIRE).unwrap();
        let eng = SPEC.convert(&raw);
        assert_eq!(eng[0].get("status"), Some(Value::Unsigned(raw_status as u64)));
    }

    #[test]
    fn probe_requires_sentinel_in_all_records() {
        let mut buf = Vec::new();
        for _ in 0..10 {
            buf.extend_from_slice(&telegram(144, 0, 0, 0, 0));
        }
        let batch = decode(&buf, &WIRE).unwrap();
        assert!(probe(&batch));

        let mut buf = Vec::new();
        for i in 0..10u8 {
            let status = if i == 9 { 145 } else { 144 };
            buf.extend_from_slice(&telegram(status, 0, 0, 0, 0));
        }
        let batch = decode(&buf, &WIRE).unwrap();
        assert!(!probe(&batch));
    }
}
