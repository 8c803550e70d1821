//! Absolute time reconstruction for formats without a full wire timestamp.

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use typed_builder::TypedBuilder;

use crate::record::{EngineeringBatch, Value};
use crate::{Error, Result};

/// External time context supplied by the caller when a format's wire layout
/// lacks absolute time: the UTC date/time of the first telegram and, for
/// fixed-interval extrapolation, the telegram interval.
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
pub struct TimeBasis {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// Seconds between consecutive telegrams.
    #[builder(default = 1.0)]
    pub interval_secs: f64,
}

impl TimeBasis {
    /// Posix seconds of the basis instant.
    ///
    /// # Errors
    /// [`Error::TimeBasis`] if the date/time fields do not form a valid UTC
    /// instant.
    pub fn epoch_secs(&self) -> Result<f64> {
        Utc.with_ymd_and_hms(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        )
        .single()
        .map(|dt| dt.timestamp() as f64)
        .ok_or_else(|| {
            Error::TimeBasis(format!(
                "{:04}-{:02}-{:02} {:02}:{:02}:{:02} is not a valid UTC instant",
                self.year, self.month, self.day, self.hour, self.minute, self.second
            ))
        })
    }
}

/// How a format obtains absolute time, decided at registration time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeStrategy {
    /// The wire layout carries a full timestamp; reconstruction is a no-op.
    Native,
    /// No time on the wire at all: first record gets the basis epoch, each
    /// subsequent record the previous time plus the basis interval.
    FixedInterval { dest: &'static str },
    /// The wire carries only a wrapping counter: absolute time is the basis
    /// epoch plus the scaled counter, shifted by one whole period per
    /// rollover observed so far.
    CounterRollover {
        counter: &'static str,
        dest: &'static str,
        scale: f64,
        period: f64,
    },
}

/// Reconstruct per-record absolute time in place.
///
/// A `None` basis skips reconstruction entirely; the records keep whatever
/// (possibly relative or absent) time they decoded with.
///
/// # Errors
/// [`Error::TimeBasis`] if the basis date/time fields are invalid.
pub fn reconstruct(
    batch: &mut EngineeringBatch,
    strategy: &TimeStrategy,
    basis: Option<&TimeBasis>,
) -> Result<()> {
    let Some(basis) = basis else {
        return Ok(());
    };

    match *strategy {
        TimeStrategy::Native => Ok(()),
        TimeStrategy::FixedInterval { dest } => {
            let mut t = basis.epoch_secs()?;
            debug!(records = batch.len(), start = t, interval = basis.interval_secs, "extrapolating fixed-interval time");
            for rec in batch.iter_mut() {
                rec.set(dest, Value::Float(t));
                t += basis.interval_secs;
            }
            Ok(())
        }
        TimeStrategy::CounterRollover {
            counter,
            dest,
            scale,
            period,
        } => {
            let base = basis.epoch_secs()?;
            let mut rollovers = 0u64;
            let mut prev: Option<f64> = None;
            for rec in batch.iter_mut() {
                let Some(count) = rec.get(counter).and_then(|v| v.as_f64()) else {
                    continue;
                };
                if prev.is_some_and(|p| count < p) {
                    rollovers += 1;
                }
                prev = Some(count);
                rec.set(
                    dest,
                    Value::Float(base + count * scale + rollovers as f64 * period),
                );
            }
            debug!(records = batch.len(), rollovers, "reconstructed counter time");
            Ok(())
        }
    }
}
