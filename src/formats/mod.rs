//! Telegram format registry.
//!
//! One module per sensor family. Each registers a [`FormatSpec`] pairing the
//! wire layout with its engineering-unit layout, the conversion rule, the
//! time reconstruction capability, and (where the format is self-describing
//! enough) a detection probe. Adding a format means adding a module and a
//! `spec()` arm; no other component changes.

mod em3000;
mod kmbinary;
mod sbet;
mod seapath;
mod vmm;

use std::fmt::Display;

#[cfg(test)]
pub(crate) use kmbinary::telegram as kmbinary_test_telegram;

use serde::{Deserialize, Serialize};

use crate::layout::TelegramLayout;
use crate::record::{EngField, EngineeringBatch, EngineeringRecord, RawBatch, RawRecord};
use crate::time::TimeStrategy;

/// Identifies one registered telegram format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatTag {
    Em3000,
    SeapathBin11,
    SeapathBin26,
    VmmMru,
    KmBinary,
    PfreeHeave,
    Sbet,
}

impl FormatTag {
    /// All registered formats, in registry order. Detection probes candidates
    /// in this order, so it is also the detection tie-break.
    pub const ALL: [FormatTag; 7] = [
        FormatTag::Em3000,
        FormatTag::SeapathBin11,
        FormatTag::SeapathBin26,
        FormatTag::VmmMru,
        FormatTag::KmBinary,
        FormatTag::PfreeHeave,
        FormatTag::Sbet,
    ];

    /// Legacy format name as used by the originating acquisition software.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            FormatTag::Em3000 => "EM3000",
            FormatTag::SeapathBin11 => "Seapath_bin11",
            FormatTag::SeapathBin26 => "Seapath_bin26",
            FormatTag::VmmMru => "VMM_MRU_Binary",
            FormatTag::KmBinary => "KMBIN",
            FormatTag::PfreeHeave => "PFreeHeave",
            FormatTag::Sbet => "SBET",
        }
    }
}

impl Display for FormatTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything the pipeline needs to know about one format.
///
/// Specs are static and read-only for the process lifetime.
pub struct FormatSpec {
    pub tag: FormatTag,
    /// Wire layout, byte-exact per the sensor's interface documentation.
    pub wire: &'static TelegramLayout,
    /// Engineering-unit output layout.
    pub engineering: &'static [EngField],
    /// How absolute time is obtained, decided at registration time.
    pub time: TimeStrategy,
    /// Per-record conversion rule, applied after the name-matched copy.
    convert_record: fn(&RawRecord, &mut EngineeringRecord),
    /// Detection invariant over a probe batch, if the format has one.
    pub(crate) probe: Option<fn(&RawBatch) -> bool>,
}

impl FormatSpec {
    /// Convert a raw batch to engineering units, one output record per input
    /// record, order preserved.
    ///
    /// Every output field starts at its zero default. Wire fields are first
    /// copied into same-named engineering fields (a wire field with no
    /// counterpart is skipped), then the format's conversion rule overrides
    /// the scaled, remapped, and assembled fields.
    #[must_use]
    pub fn convert(&self, batch: &RawBatch) -> EngineeringBatch {
        batch
            .iter()
            .map(|raw| {
                let mut out = EngineeringRecord::zeroed(self.engineering);
                for field in self.engineering {
                    if let Some(v) = raw.get(field.name) {
                        out.set(field.name, v);
                    }
                }
                (self.convert_record)(raw, &mut out);
                out
            })
            .collect()
    }
}

/// Lookup the static spec for a format.
#[must_use]
pub fn spec(tag: FormatTag) -> &'static FormatSpec {
    match tag {
        FormatTag::Em3000 => &em3000::SPEC,
        FormatTag::SeapathBin11 => &seapath::BIN11,
        FormatTag::SeapathBin26 => &seapath::BIN26,
        FormatTag::VmmMru => &vmm::SPEC,
        FormatTag::KmBinary => &kmbinary::SPEC,
        FormatTag::PfreeHeave => &seapath::PFREE_HEAVE,
        FormatTag::Sbet => &sbet::SPEC,
    }
}

// Scale constants shared across the Seapath-style integer encodings.

/// Centimeter count to meters.
pub(crate) const CM: f64 = 0.01;
/// 32-bit two's-complement position fraction to degrees.
pub(crate) const POSITION_SCALE: f64 = 90.0 / ((1u64 << 30) as f64);
/// 16-bit heading fraction to degrees.
pub(crate) const HEADING_SCALE: f64 = 360.0 / ((1u64 << 16) as f64);
/// 14-bit attitude/rate fraction to degrees (or degrees/second).
pub(crate) const ATTITUDE_SCALE: f64 = 90.0 / ((1u64 << 14) as f64);

/// Whole seconds plus a scaled sub-second fraction.
pub(crate) fn seconds_with_fraction(seconds: f64, fraction: f64, fraction_scale: f64) -> f64 {
    seconds + fraction * fraction_scale
}

/// Raw field as f64, for the scale overrides. Missing or non-numeric fields
/// yield `None` and the engineering field keeps its current value.
pub(crate) fn raw_f64(raw: &RawRecord, name: &str) -> Option<f64> {
    raw.get(name).and_then(|v| v.as_f64())
}
