//! VMM MRU attitude and velocity telegram.
//!
//! Big-endian, IEEE floats on the wire with angles in radians. The only time
//! information is a nanosecond counter that wraps every second, so absolute
//! time requires counter-rollover reconstruction against a caller supplied
//! time basis.

use super::{raw_f64, FormatSpec, FormatTag};
use crate::layout::{be, FieldKind, TelegramLayout};
use crate::record::{eng, EngField, EngKind, EngineeringRecord, RawRecord, Value};
use crate::time::TimeStrategy;

static WIRE: TelegramLayout = TelegramLayout {
    fields: &[
        be("header", FieldKind::U8),
        be("length", FieldKind::U8),
        be("token", FieldKind::U8),
        be("roll", FieldKind::F32),
        be("pitch", FieldKind::F32),
        be("yaw", FieldKind::F32),
        be("ang_vel_roll", FieldKind::F32),
        be("ang_vel_pitch", FieldKind::F32),
        be("ang_vel_yaw", FieldKind::F32),
        be("lin_vel_forward", FieldKind::F32),
        be("lin_vel_starboard", FieldKind::F32),
        be("lin_vel_down", FieldKind::F32),
        be("lin_acc_forward", FieldKind::F32),
        be("lin_acc_starboard", FieldKind::F32),
        be("lin_acc_down", FieldKind::F32),
        be("fraction_time", FieldKind::I32),
        be("checksum", FieldKind::U8),
    ],
};

static ENGINEERING: [EngField; 18] = [
    eng("utc_time", EngKind::Float),
    eng("header", EngKind::Unsigned),
    eng("length", EngKind::Unsigned),
    eng("token", EngKind::Unsigned),
    eng("roll", EngKind::Float),
    eng("pitch", EngKind::Float),
    eng("yaw", EngKind::Float),
    eng("ang_vel_roll", EngKind::Float),
    eng("ang_vel_pitch", EngKind::Float),
    eng("ang_vel_yaw", EngKind::Float),
    eng("lin_vel_forward", EngKind::Float),
    eng("lin_vel_starboard", EngKind::Float),
    eng("lin_vel_down", EngKind::Float),
    eng("lin_acc_forward", EngKind::Float),
    eng("lin_acc_starboard", EngKind::Float),
    eng("lin_acc_down", EngKind::Float),
    eng("fraction_time", EngKind::Signed),
    eng("checksum", EngKind::Unsigned),
];

/// Angle fields carried in radians on the wire.
const RADIAN_FIELDS: [&str; 6] = [
    "roll",
    "pitch",
    "yaw",
    "ang_vel_roll",
    "ang_vel_pitch",
    "ang_vel_yaw",
];

fn convert(raw: &RawRecord, out: &mut EngineeringRecord) {
    for name in RADIAN_FIELDS {
        if let Some(v) = raw_f64(raw, name) {
            out.set(name, Value::Float(v.to_degrees()));
        }
    }
}

pub(crate) static SPEC: FormatSpec = FormatSpec {
    tag: FormatTag::VmmMru,
    wire: &WIRE,
    engineering: &ENGINEERING,
    time: TimeStrategy::CounterRollover {
        counter: "fraction_time",
        dest: "utc_time",
        scale: 1e-9,
        period: 1.0,
    },
    convert_record: convert,
    probe: None,
};
