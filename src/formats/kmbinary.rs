//! Kongsberg KM binary (KMB) telegram.
//!
//! Little-endian, self-describing via a `#KMB` ASCII id marker. Positions and
//! attitude are already IEEE floats in engineering units; only the two
//! seconds/nanoseconds time pairs and the quality status word need
//! conversion.

use super::{raw_f64, seconds_with_fraction, FormatSpec, FormatTag};
use crate::layout::{le, FieldKind, TelegramLayout};
use crate::record::{eng, EngField, EngKind, EngineeringRecord, RawBatch, RawRecord, Value};
use crate::time::TimeStrategy;

/// ASCII id marker opening every KMB telegram.
pub(crate) const ID_MARKER: [u8; 4] = *b"#KMB";

/// Nanosecond counts to seconds.
const NANO_SCALE: f64 = 1e-9;

static WIRE: TelegramLayout = TelegramLayout {
    fields: &[
        le("id", FieldKind::Ascii4),
        le("length", FieldKind::U16),
        le("version", FieldKind::U16),
        le("utc_seconds", FieldKind::U32),
        le("utc_nanos", FieldKind::U32),
        le("status", FieldKind::U32),
        le("latitude", FieldKind::F64),
        le("longitude", FieldKind::F64),
        le("height", FieldKind::F32),
        le("roll", FieldKind::F32),
        le("pitch", FieldKind::F32),
        le("heading", FieldKind::F32),
        le("heave", FieldKind::F32),
        le("roll_rate", FieldKind::F32),
        le("pitch_rate", FieldKind::F32),
        le("yaw_rate", FieldKind::F32),
        le("north_vel", FieldKind::F32),
        le("east_vel", FieldKind::F32),
        le("down_vel", FieldKind::F32),
        le("latitude_error", FieldKind::F32),
        le("longitude_error", FieldKind::F32),
        le("height_error", FieldKind::F32),
        le("roll_error", FieldKind::F32),
        le("pitch_error", FieldKind::F32),
        le("heading_error", FieldKind::F32),
        le("heave_error", FieldKind::F32),
        le("north_acceleration", FieldKind::F32),
        le("east_acceleration", FieldKind::F32),
        le("down_acceleration", FieldKind::F32),
        le("delayed_seconds", FieldKind::U32),
        le("delayed_nanos", FieldKind::U32),
        le("delayed_heave", FieldKind::F32),
    ],
};

static ENGINEERING: [EngField; 32] = [
    eng("utc_time", EngKind::Float),
    eng("latitude", EngKind::Float),
    eng("longitude", EngKind::Float),
    eng("height", EngKind::Float),
    eng("roll", EngKind::Float),
    eng("pitch", EngKind::Float),
    eng("heading", EngKind::Float),
    eng("heave", EngKind::Float),
    eng("roll_rate", EngKind::Float),
    eng("pitch_rate", EngKind::Float),
    eng("yaw_rate", EngKind::Float),
    eng("north_vel", EngKind::Float),
    eng("east_vel", EngKind::Float),
    eng("down_vel", EngKind::Float),
    eng("latitude_error", EngKind::Float),
    eng("longitude_error", EngKind::Float),
    eng("height_error", EngKind::Float),
    eng("roll_error", EngKind::Float),
    eng("pitch_error", EngKind::Float),
    eng("heading_error", EngKind::Float),
    eng("heave_error", EngKind::Float),
    eng("north_acceleration", EngKind::Float),
    eng("east_acceleration", EngKind::Float),
    eng("down_acceleration", EngKind::Float),
    eng("delayed_time", EngKind::Float),
    eng("delayed_heave", EngKind::Float),
    eng("status_horiz_pos_vel", EngKind::Unsigned),
    eng("status_roll_pitch", EngKind::Unsigned),
    eng("status_heading", EngKind::Unsigned),
    eng("status_heave_vec", EngKind::Unsigned),
    eng("status_acceleration", EngKind::Unsigned),
    eng("status_delayed", EngKind::Unsigned),
];

/// Status word bit table: 1-based bit position, quality category, code when
/// the bit is set. The low bits signal reduced accuracy (code 2), the high
/// bits signal interpolated/predicted data (code 1). Entries apply in order,
/// so when a category has both its bits set the later entry wins. The table
/// is reproduced exactly as the sensor interface enumerates it, including the
/// asymmetric appearance of `status_delayed` only in the high-bit half.
const STATUS_BITS: [(u32, &str, u64); 11] = [
    (1, "status_horiz_pos_vel", 2),
    (2, "status_roll_pitch", 2),
    (3, "status_heading", 2),
    (4, "status_heave_vec", 2),
    (5, "status_acceleration", 2),
    (16, "status_delayed", 1),
    (17, "status_horiz_pos_vel", 1),
    (18, "status_roll_pitch", 1),
    (19, "status_heading", 1),
    (20, "status_heave_vec", 1),
    (21, "status_acceleration", 1),
];

fn bit_set(word: u64, position: u32) -> bool {
    word & (1 << (position - 1)) != 0
}

fn convert(raw: &RawRecord, out: &mut EngineeringRecord) {
    if let (Some(sec), Some(nanos)) = (raw_f64(raw, "utc_seconds"), raw_f64(raw, "utc_nanos")) {
        out.set(
            "utc_time",
            Value::Float(seconds_with_fraction(sec, nanos, NANO_SCALE)),
        );
    }
    if let (Some(sec), Some(nanos)) = (
        raw_f64(raw, "delayed_seconds"),
        raw_f64(raw, "delayed_nanos"),
    ) {
        out.set(
            "delayed_time",
            Value::Float(seconds_with_fraction(sec, nanos, NANO_SCALE)),
        );
    }
    if let Some(word) = raw.get("status").and_then(|v| v.as_u64()) {
        for (position, category, code) in STATUS_BITS {
            if bit_set(word, position) {
                out.set(category, Value::Unsigned(code));
            }
        }
    }
}

fn probe(batch: &RawBatch) -> bool {
    batch
        .iter()
        .all(|r| r.get("id") == Some(Value::Bytes(ID_MARKER)))
}

pub(crate) static SPEC: FormatSpec = FormatSpec {
    tag: FormatTag::KmBinary,
    wire: &WIRE,
    engineering: &ENGINEERING,
    time: TimeStrategy::Native,
    convert_record: convert,
    probe: Some(probe),
};

#[cfg(test)]
pub(crate) fn telegram(utc_seconds: u32, utc_nanos: u32, status: u32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(132);
    buf.extend_from_slice(&ID_MARKER);
    buf.extend_from_slice(&132u16.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes());
    buf.extend_from_slice(&utc_seconds.to_le_bytes());
    buf.extend_from_slice(&utc_nanos.to_le_bytes());
    buf.extend_from_slice(&status.to_le_bytes());
    buf.extend_from_slice(&59.5f64.to_le_bytes()); // latitude
    buf.extend_from_slice(&10.75f64.to_le_bytes()); // longitude
    for _ in 0..21 {
        buf.extend_from_slice(&0.25f32.to_le_bytes());
    }
    buf.extend_from_slice(&utc_seconds.to_le_bytes()); // delayed_seconds
    buf.extend_from_slice(&0u32.to_le_bytes()); // delayed_nanos
    buf.extend_from_slice(&(-0.5f32).to_le_bytes()); // delayed_heave
    buf
}
