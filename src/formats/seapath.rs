//! Kongsberg Seapath binary telegrams.
//!
//! Covers the Seapath binary format 11 and format 26 motion/position
//! telegrams and the standalone delayed-heave ("PFreeHeave") telegram. All
//! three are big-endian with integer wire encodings: positions as 32-bit
//! binary fractions of 90 degrees, attitude as 14-bit fractions of 90
//! degrees, heading as a 16-bit fraction of 360 degrees, linear quantities in
//! centimeters, and time as posix seconds plus a 0.1 ms fraction count.
//!
//! Wire heave is positive down; engineering heave is positive up, hence the
//! sign flip on heave and delayed heave. The standalone heave telegram does
//! not flip, matching the sensor's own convention for that output.

use super::{
    raw_f64, seconds_with_fraction, FormatSpec, FormatTag, ATTITUDE_SCALE, CM, HEADING_SCALE,
    POSITION_SCALE,
};
use crate::layout::{be, FieldKind, TelegramLayout};
use crate::record::{eng, EngField, EngKind, EngineeringRecord, RawRecord, Value};
use crate::time::TimeStrategy;

/// 0.1 millisecond fraction counts to seconds.
const FRACTION_SCALE: f64 = 1e-4;

static BIN11_WIRE: TelegramLayout = TelegramLayout {
    fields: &[
        be("header1", FieldKind::U8),
        be("utc_time", FieldKind::I32),
        be("utc_fraction", FieldKind::U8),
        be("latitude", FieldKind::I32),
        be("longitude", FieldKind::I32),
        be("height", FieldKind::I32),
        be("heave", FieldKind::I16),
        be("north_vel", FieldKind::I16),
        be("east_vel", FieldKind::I16),
        be("down_vel", FieldKind::I16),
        be("roll", FieldKind::I16),
        be("pitch", FieldKind::I16),
        be("heading", FieldKind::U16),
        be("roll_rate", FieldKind::I16),
        be("pitch_rate", FieldKind::I16),
        be("yaw_rate", FieldKind::I16),
        be("status", FieldKind::U16),
        be("checksum", FieldKind::U16),
    ],
};

static BIN11_ENGINEERING: [EngField; 17] = [
    eng("header1", EngKind::Unsigned),
    eng("utc_time", EngKind::Float),
    eng("latitude", EngKind::Float),
    eng("longitude", EngKind::Float),
    eng("height", EngKind::Float),
    eng("heave", EngKind::Float),
    eng("north_vel", EngKind::Float),
    eng("east_vel", EngKind::Float),
    eng("down_vel", EngKind::Float),
    eng("roll", EngKind::Float),
    eng("pitch", EngKind::Float),
    eng("heading", EngKind::Float),
    eng("roll_rate", EngKind::Float),
    eng("pitch_rate", EngKind::Float),
    eng("yaw_rate", EngKind::Float),
    eng("status", EngKind::Unsigned),
    eng("checksum", EngKind::Unsigned),
];

static BIN26_WIRE: TelegramLayout = TelegramLayout {
    fields: &[
        be("header1", FieldKind::U8),
        be("header2", FieldKind::U8),
        be("utc_time", FieldKind::I32),
        be("utc_fraction", FieldKind::U16),
        be("latitude", FieldKind::I32),
        be("longitude", FieldKind::I32),
        be("height", FieldKind::I32),
        be("heave", FieldKind::I16),
        be("north_vel", FieldKind::I16),
        be("east_vel", FieldKind::I16),
        be("down_vel", FieldKind::I16),
        be("roll", FieldKind::I16),
        be("pitch", FieldKind::I16),
        be("heading", FieldKind::U16),
        be("roll_rate", FieldKind::I16),
        be("pitch_rate", FieldKind::I16),
        be("yaw_rate", FieldKind::I16),
        be("delayed_heave_time", FieldKind::I32),
        be("delayed_heave_frac", FieldKind::U16),
        be("delayed_heave", FieldKind::I16),
        be("status", FieldKind::U16),
        be("checksum", FieldKind::U16),
    ],
};

static BIN26_ENGINEERING: [EngField; 20] = [
    eng("header1", EngKind::Unsigned),
    eng("header2", EngKind::Unsigned),
    eng("utc_time", EngKind::Float),
    eng("latitude", EngKind::Float),
    eng("longitude", EngKind::Float),
    eng("height", EngKind::Float),
    eng("heave", EngKind::Float),
    eng("north_vel", EngKind::Float),
    eng("east_vel", EngKind::Float),
    eng("down_vel", EngKind::Float),
    eng("roll", EngKind::Float),
    eng("pitch", EngKind::Float),
    eng("heading", EngKind::Float),
    eng("roll_rate", EngKind::Float),
    eng("pitch_rate", EngKind::Float),
    eng("yaw_rate", EngKind::Float),
    eng("delayed_heave_time", EngKind::Float),
    eng("delayed_heave", EngKind::Float),
    eng("status", EngKind::Unsigned),
    eng("checksum", EngKind::Unsigned),
];

static PFREE_WIRE: TelegramLayout = TelegramLayout {
    fields: &[
        be("header1", FieldKind::U8),
        be("header2", FieldKind::U8),
        be("posix", FieldKind::I32),
        be("fraction", FieldKind::U16),
        be("heave", FieldKind::I16),
        be("status", FieldKind::U8),
        be("checksum", FieldKind::U16),
    ],
};

static PFREE_ENGINEERING: [EngField; 6] = [
    eng("header1", EngKind::Unsigned),
    eng("header2", EngKind::Unsigned),
    eng("utc_time", EngKind::Float),
    eng("heave", EngKind::Float),
    eng("status", EngKind::Unsigned),
    eng("checksum", EngKind::Unsigned),
];

/// Scale/sign rules shared by format 11 and 26.
fn convert_motion(raw: &RawRecord, out: &mut EngineeringRecord) {
    let scaled = [
        ("latitude", POSITION_SCALE),
        ("longitude", POSITION_SCALE),
        ("height", CM),
        ("north_vel", CM),
        ("east_vel", CM),
        ("down_vel", CM),
        ("roll", ATTITUDE_SCALE),
        ("pitch", ATTITUDE_SCALE),
        ("roll_rate", ATTITUDE_SCALE),
        ("pitch_rate", ATTITUDE_SCALE),
        ("yaw_rate", ATTITUDE_SCALE),
        ("heading", HEADING_SCALE),
    ];
    for (name, scale) in scaled {
        if let Some(v) = raw_f64(raw, name) {
            out.set(name, Value::Float(v * scale));
        }
    }
    // wire positive-down, engineering positive-up
    if let Some(v) = raw_f64(raw, "heave") {
        out.set("heave", Value::Float(-(v * CM)));
    }
    if let (Some(sec), Some(frac)) = (raw_f64(raw, "utc_time"), raw_f64(raw, "utc_fraction")) {
        out.set(
            "utc_time",
            Value::Float(seconds_with_fraction(sec, frac, FRACTION_SCALE)),
        );
    }
}

fn convert_bin11(raw: &RawRecord, out: &mut EngineeringRecord) {
    convert_motion(raw, out);
}

fn convert_bin26(raw: &RawRecord, out: &mut EngineeringRecord) {
    convert_motion(raw, out);
    if let Some(v) = raw_f64(raw, "delayed_heave") {
        out.set("delayed_heave", Value::Float(-(v * CM)));
    }
    if let (Some(sec), Some(frac)) = (
        raw_f64(raw, "delayed_heave_time"),
        raw_f64(raw, "delayed_heave_frac"),
    ) {
        out.set(
            "delayed_heave_time",
            Value::Float(seconds_with_fraction(sec, frac, FRACTION_SCALE)),
        );
    }
}

fn convert_pfree(raw: &RawRecord, out: &mut EngineeringRecord) {
    if let (Some(sec), Some(frac)) = (raw_f64(raw, "posix"), raw_f64(raw, "fraction")) {
        out.set(
            "utc_time",
            Value::Float(seconds_with_fraction(sec, frac, FRACTION_SCALE)),
        );
    }
    if let Some(v) = raw_f64(raw, "heave") {
        out.set("heave", Value::Float(v * CM));
    }
}

pub(crate) static BIN11: FormatSpec = FormatSpec {
    tag: FormatTag::SeapathBin11,
    wire: &BIN11_WIRE,
    engineering: &BIN11_ENGINEERING,
    time: TimeStrategy::Native,
    convert_record: convert_bin11,
    probe: None,
};

pub(crate) static BIN26: FormatSpec = FormatSpec {
    tag: FormatTag::SeapathBin26,
    wire: &BIN26_WIRE,
    engineering: &BIN26_ENGINEERING,
    time: TimeStrategy::Native,
    convert_record: convert_bin26,
    probe: None,
};

pub(crate) static PFREE_HEAVE: FormatSpec = FormatSpec {
    tag: FormatTag::PfreeHeave,
    wire: &PFREE_WIRE,
    engineering: &PFREE_ENGINEERING,
    time: TimeStrategy::Native,
    convert_record: convert_pfree,
    probe: None,
};
