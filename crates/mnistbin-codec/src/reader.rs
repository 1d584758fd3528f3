//! Streaming reader over a binary record file

use std::io::{ErrorKind, Read};

use crate::codec::RecordCodec;
use crate::error::CodecError;
use crate::layout::RECORD_STRIDE;
use crate::record::{BinaryRecord, TextRecord};

/// Iterates the records of a binary file one stride at a time
///
/// A trailing partial record yields [`CodecError::InvalidRecordLength`] and
/// ends the iteration.
#[derive(Debug)]
pub struct RecordReader<R> {
    inner: R,
    codec: RecordCodec,
    records_read: u64,
    done: bool,
}

impl<R: Read> RecordReader<R> {
    /// Create a reader decoding labels with `codec`
    #[inline]
    #[must_use]
    pub fn new(inner: R, codec: RecordCodec) -> Self {
        Self {
            inner,
            codec,
            records_read: 0,
            done: false,
        }
    }

    /// Number of complete records yielded so far
    #[inline]
    #[must_use]
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Read the next raw record
    ///
    /// # Errors
    /// Returns [`CodecError::InvalidRecordLength`] on a trailing partial
    /// record, or the underlying I/O error.
    pub fn next_binary(&mut self) -> Result<Option<BinaryRecord>, CodecError> {
        let mut buf = [0u8; RECORD_STRIDE];
        let mut filled = 0;
        while filled < RECORD_STRIDE {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        match filled {
            0 => Ok(None),
            RECORD_STRIDE => {
                self.records_read += 1;
                Ok(Some(BinaryRecord::from_bytes(buf)))
            }
            actual => Err(CodecError::InvalidRecordLength { actual }),
        }
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<TextRecord, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_binary() {
            Ok(Some(record)) => Some(Ok(self.codec.decode_record(&record))),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
