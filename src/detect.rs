//! Telegram format auto-detection.
//!
//! Each self-describing format registers a probe invariant over a small fixed
//! number of decoded records. Candidates are tried in registry declaration
//! order ([`crate::FormatTag::ALL`]), so a sample that would satisfy more than
//! one invariant resolves deterministically to the earliest candidate.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, trace};

use crate::decode::decode;
use crate::formats::{self, FormatTag};
use crate::{Error, Result};

/// Number of telegrams decoded per candidate before its invariant is tested.
pub const PROBE_RECORDS: usize = 10;

/// How the probe sample was acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMode {
    /// Sample is a file (or a whole-file image): probe each candidate on a
    /// fresh prefix of the data; a candidate the sample is too short for is
    /// skipped.
    File,
    /// Sample is a live capture of exactly `PROBE_RECORDS` telegrams: a
    /// length that does not match a probed candidate's expectation is a
    /// [`Error::MalformedInput`] rather than a silent probe failure.
    Live,
}

/// Probe sample input.
#[derive(Debug, Clone, Copy)]
pub enum Sample<'a> {
    Path(&'a Path),
    Bytes(&'a [u8]),
}

/// Detect which registered format a byte stream carries.
///
/// # Errors
/// [`Error::NoFormatMatched`] if no candidate invariant holds;
/// [`Error::MalformedInput`] for a live sample whose length does not match a
/// probed candidate; any I/O error reading a path sample.
pub fn detect_format(sample: Sample, mode: ProbeMode) -> Result<FormatTag> {
    for tag in FormatTag::ALL {
        let spec = formats::spec(tag);
        let Some(probe) = spec.probe else {
            continue;
        };
        let need = spec.wire.record_len() * PROBE_RECORDS;
        trace!(format = %tag, need, "probing candidate");

        let owned;
        let data: &[u8] = match sample {
            Sample::Bytes(b) => b,
            Sample::Path(p) => {
                owned = read_prefix(p, need, mode)?;
                &owned
            }
        };

        match mode {
            ProbeMode::Live => {
                if data.len() != need {
                    return Err(Error::MalformedInput {
                        actual: data.len(),
                        expected: need,
                    });
                }
            }
            ProbeMode::File => {
                if data.len() < need {
                    trace!(format = %tag, have = data.len(), "sample too short for candidate");
                    continue;
                }
            }
        }

        let Ok(batch) = decode(&data[..need], spec.wire) else {
            continue;
        };
        if probe(&batch) {
            debug!(format = %tag, "probe invariant held");
            return Ok(tag);
        }
    }
    Err(Error::NoFormatMatched)
}

/// Read up to `limit` bytes from the start of the file. In live mode the
/// whole file stands in for the captured buffer, so read it all.
fn read_prefix(path: &Path, limit: usize, mode: ProbeMode) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut file = File::open(path)?;
    match mode {
        ProbeMode::File => {
            file.take(limit as u64).read_to_end(&mut buf)?;
        }
        ProbeMode::Live => {
            file.read_to_end(&mut buf)?;
        }
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn em3000_sample(status: u8, records: usize) -> Vec<u8> {
        let mut buf = Vec::new();
        for _ in 0..records {
            buf.extend_from_slice(&[status, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        }
        buf
    }

    #[test]
    fn detects_em3000_from_live_buffer() {
        let buf = em3000_sample(144, PROBE_RECORDS);
        let tag = detect_format(Sample::Bytes(&buf), ProbeMode::Live).unwrap();
        assert_eq!(tag, FormatTag::Em3000);
    }

    #[test]
    fn live_buffer_of_wrong_length_is_malformed() {
        let buf = em3000_sample(144, PROBE_RECORDS - 1);
        match detect_format(Sample::Bytes(&buf), ProbeMode::Live) {
            Err(Error::MalformedInput { actual, expected }) => {
                assert_eq!(actual, 90);
                assert_eq!(expected, 100);
            }
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn non_sentinel_status_does_not_match() {
        let buf = em3000_sample(7, PROBE_RECORDS);
        // 100 bytes also fails the KMB length probe, so nothing matches
        assert!(matches!(
            detect_format(Sample::Bytes(&buf), ProbeMode::File),
            Err(Error::NoFormatMatched)
        ));
    }

    #[test]
    fn detects_kmbinary_by_id_marker() {
        let mut buf = Vec::new();
        for _ in 0..PROBE_RECORDS {
            buf.extend_from_slice(&crate::formats::kmbinary_test_telegram(0, 0, 0));
        }
        let tag = detect_format(Sample::Bytes(&buf), ProbeMode::File).unwrap();
        assert_eq!(tag, FormatTag::KmBinary);
    }

    #[test]
    fn detection_is_deterministic() {
        let buf = em3000_sample(144, PROBE_RECORDS);
        for _ in 0..5 {
            assert_eq!(
                detect_format(Sample::Bytes(&buf), ProbeMode::Live).unwrap(),
                FormatTag::Em3000
            );
        }
    }

    #[test]
    fn detects_from_file_with_trailing_data() {
        let mut buf = em3000_sample(144, PROBE_RECORDS * 3);
        buf.push(0xff); // ragged tail is fine for probing, only decode cares
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&buf).unwrap();

        let tag = detect_format(Sample::Path(f.path()), ProbeMode::File).unwrap();
        assert_eq!(tag, FormatTag::Em3000);
    }

    #[test]
    fn short_file_matches_nothing() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&em3000_sample(144, 2)).unwrap();
        assert!(matches!(
            detect_format(Sample::Path(f.path()), ProbeMode::File),
            Err(Error::NoFormatMatched)
        ));
    }
}
