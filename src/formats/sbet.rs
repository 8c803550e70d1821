//! Applanix smoothed best-estimate trajectory (SBET) record.
//!
//! Post-processed navigation output: 17 little-endian doubles per record,
//! angles in radians. Conversion is in place; the engineering layout keeps
//! the wire field order.

use super::{raw_f64, FormatSpec, FormatTag};
use crate::layout::{le, FieldKind, TelegramLayout};
use crate::record::{eng, EngField, EngKind, EngineeringRecord, RawRecord, Value};
use crate::time::TimeStrategy;

static WIRE: TelegramLayout = TelegramLayout {
    fields: &[
        le("utc_time", FieldKind::F64),
        le("latitude", FieldKind::F64),
        le("longitude", FieldKind::F64),
        le("height", FieldKind::F64),
        le("x_velocity", FieldKind::F64),
        le("y_velocity", FieldKind::F64),
        le("z_velocity", FieldKind::F64),
        le("roll", FieldKind::F64),
        le("pitch", FieldKind::F64),
        le("heading", FieldKind::F64),
        le("wander_angle", FieldKind::F64),
        le("x_acceleration", FieldKind::F64),
        le("y_acceleration", FieldKind::F64),
        le("z_acceleration", FieldKind::F64),
        le("x_angular_rate", FieldKind::F64),
        le("y_angular_rate", FieldKind::F64),
        le("z_angular_rate", FieldKind::F64),
    ],
};

static ENGINEERING: [EngField; 17] = [
    eng("utc_time", EngKind::Float),
    eng("latitude", EngKind::Float),
    eng("longitude", EngKind::Float),
    eng("height", EngKind::Float),
    eng("x_velocity", EngKind::Float),
    eng("y_velocity", EngKind::Float),
    eng("z_velocity", EngKind::Float),
    eng("roll", EngKind::Float),
    eng("pitch", EngKind::Float),
    eng("heading", EngKind::Float),
    eng("wander_angle", EngKind::Float),
    eng("x_acceleration", EngKind::Float),
    eng("y_acceleration", EngKind::Float),
    eng("z_acceleration", EngKind::Float),
    eng("x_angular_rate", EngKind::Float),
    eng("y_angular_rate", EngKind::Float),
    eng("z_angular_rate", EngKind::Float),
];

const RADIAN_FIELDS: [&str; 7] = [
    "latitude",
    "longitude",
    "roll",
    "pitch",
    "x_angular_rate",
    "y_angular_rate",
    "z_angular_rate",
];

/// Heading comes as radians in [-pi, pi]; survey convention is degrees in
/// [0, 360).
fn heading_degrees(rad: f64) -> f64 {
    let deg = rad.to_degrees();
    if deg < 0.0 {
        deg + 360.0
    } else {
        deg
    }
}

fn convert(raw: &RawRecord, out: &mut EngineeringRecord) {
    for name in RADIAN_FIELDS {
        if let Some(v) = raw_f64(raw, name) {
            out.set(name, Value::Float(v.to_degrees()));
        }
    }
    if let Some(v) = raw_f64(raw, "heading") {
        out.set("heading", Value::Float(heading_degrees(v)));
    }
}

pub(crate) static SPEC: FormatSpec = FormatSpec {
    tag: FormatTag::Sbet,
    wire: &WIRE,
    engineering: &ENGINEERING,
    time: TimeStrategy::Native,
    convert_record: convert,
    probe: None,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn radian_fields_become_degrees() {
        let values = [
            123456.789,  // utc_time, untouched
            FRAC_PI_4,   // latitude -> 45
            -FRAC_PI_2,  // longitude -> -90
            12.5,        // height, untouched
            1.0,
            -2.0,
            0.5,
            PI / 6.0,    // roll -> 30
            -PI / 6.0,   // pitch -> -30
            -FRAC_PI_2,  // heading -> 270
            0.0,
            0.0,
            0.0,
            0.0,
            PI,          // x_angular_rate -> 180
            0.0,
            0.0,
        ];
        let mut buf = Vec::new();
        for v in values {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        assert_eq!(buf.len(), 136);

        let raw = decode(&buf, &WIRE).unwrap();
        let eng = SPEC.convert(&raw);
        let rec = &eng[0];

        let close = |name: &str, expected: f64| {
            let got = rec.get(name).unwrap().as_f64().unwrap();
            assert!((got - expected).abs() < 1e-9, "{name}: {got} != {expected}");
        };
        close("utc_time", 123456.789);
        close("latitude", 45.0);
        close("longitude", -90.0);
        close("height", 12.5);
        close("x_velocity", 1.0);
        close("roll", 30.0);
        close("pitch", -30.0);
        close("heading", 270.0);
        close("x_angular_rate", 180.0);
    }

    #[test]
    fn positive_heading_is_not_wrapped() {
        assert!((heading_degrees(FRAC_PI_2) - 90.0).abs() < 1e-9);
        assert!((heading_degrees(0.0)).abs() < 1e-9);
        assert!((heading_degrees(-PI) - 180.0).abs() < 1e-9);
    }
}
