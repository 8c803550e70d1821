#![doc = include_str!("../README.md")]

mod error;

pub mod decode;
pub mod detect;
pub mod formats;
pub mod layout;
pub mod pipeline;
pub mod record;
pub mod source;
pub mod time;

pub use decode::decode;
pub use detect::{detect_format, ProbeMode, Sample};
pub use error::{Error, Result};
pub use formats::FormatTag;
pub use pipeline::{run_bytes, run_file, FormatSelect};
pub use record::{EngineeringBatch, EngineeringRecord, RawBatch, RawRecord, Value};
pub use time::TimeBasis;
