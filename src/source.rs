//! Boundary abstractions: where telegram bytes come from and where
//! engineering batches go.
//!
//! The core itself never opens, prints, or persists anything; callers hand it
//! byte buffers and receive tagged batches. These types cover the two live
//! acquisition shapes: a reader producing whole fixed-width telegrams, and a
//! sink consuming finished batches.

use std::io::{self, Read};

use crate::formats::FormatTag;
use crate::record::EngineeringBatch;

/// Reads whole fixed-width telegrams from a byte stream.
///
/// Iteration ends on a clean EOF at a telegram boundary; EOF in the middle of
/// a telegram is an [`io::ErrorKind::UnexpectedEof`] error, never a silently
/// truncated telegram.
pub struct TelegramReader<R>
where
    R: Read,
{
    reader: R,
    width: usize,
    offset: usize,
}

impl<R> TelegramReader<R>
where
    R: Read,
{
    /// New reader producing `width`-byte telegrams.
    pub fn new(reader: R, width: usize) -> Self {
        assert!(width > 0, "telegram width must be positive");
        TelegramReader {
            reader,
            width,
            offset: 0,
        }
    }

    /// Total bytes consumed so far.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Read the next complete telegram, or `None` at a clean EOF.
    pub fn next_telegram(&mut self) -> Option<io::Result<Vec<u8>>> {
        let mut buf = vec![0u8; self.width];
        let mut filled = 0;
        while filled < self.width {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Some(Err(err)),
            }
        }
        if filled == 0 {
            None
        } else if filled < self.width {
            Some(Err(io::Error::from(io::ErrorKind::UnexpectedEof)))
        } else {
            self.offset += self.width;
            Some(Ok(buf))
        }
    }
}

impl<R> Iterator for TelegramReader<R>
where
    R: Read,
{
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_telegram()
    }
}

/// Consumer of finished engineering batches.
pub trait BatchSink {
    /// Accept a converted batch tagged with its resolved format.
    ///
    /// # Errors
    /// Any error writing to the underlying destination.
    fn accept(&mut self, tag: FormatTag, batch: EngineeringBatch) -> io::Result<()>;
}

/// In-memory sink, mostly useful for tests and buffering callers.
#[derive(Debug, Default)]
pub struct VecSink {
    pub batches: Vec<(FormatTag, EngineeringBatch)>,
}

impl BatchSink for VecSink {
    fn accept(&mut self, tag: FormatTag, batch: EngineeringBatch) -> io::Result<()> {
        self.batches.push((tag, batch));
        Ok(())
    }
}
