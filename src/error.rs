#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Input length does not line up with the fixed telegram width expected
    /// by the layout or probe.
    #[error("malformed input: {actual} bytes does not fit expected {expected}-byte boundary")]
    MalformedInput { actual: usize, expected: usize },

    /// No registered format's probe invariant held for the sample.
    #[error("no format matched; specify a format explicitly")]
    NoFormatMatched,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The caller-supplied date/time fields do not form a valid UTC instant.
    #[error("invalid time basis: {0}")]
    TimeBasis(String),
}

pub type Result<T> = std::result::Result<T, Error>;
