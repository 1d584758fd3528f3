//! Stream driver
//!
//! Feeds records from a text source through the codec into a byte sink until
//! the source is exhausted. Nothing is accumulated: each record is written as
//! soon as it is encoded.

use std::io::{BufRead, Write};

use mnistbin_codec::{CodecError, LineSource, RecordCodec, RECORD_STRIDE};
use serde::Serialize;

/// Driver state
///
/// Transitions:
/// ```text
/// Reading ──(label line read yields nothing)──▶ Exhausted
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DriverState {
    /// More records may follow
    Reading,
    /// Source returned end of input before a label line (terminal)
    Exhausted,
}

impl DriverState {
    /// Check if state is terminal
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// Counters for one stream conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    /// Records written
    pub records: u64,
    /// Bytes written (always `records * RECORD_STRIDE`)
    pub bytes_written: u64,
    /// Text lines consumed
    pub lines_read: u64,
}

/// Drives one text source into one sink
#[derive(Debug)]
pub struct Driver<R, W> {
    source: LineSource<R>,
    sink: W,
    codec: RecordCodec,
    state: DriverState,
    stats: ConversionStats,
}

impl<R: BufRead, W: Write> Driver<R, W> {
    /// Create a driver positioned at the start of `source`
    pub fn new(source: R, sink: W, codec: RecordCodec) -> Self {
        Self {
            source: LineSource::new(source),
            sink,
            codec,
            state: DriverState::Reading,
            stats: ConversionStats::default(),
        }
    }

    /// Current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Counters so far
    #[inline]
    #[must_use]
    pub fn stats(&self) -> ConversionStats {
        self.stats
    }

    /// Convert one record
    ///
    /// Does nothing once [`DriverState::Exhausted`] is reached. A failed record
    /// writes no bytes.
    ///
    /// # Errors
    /// Returns the codec error of the current record, or the sink's write error.
    pub fn step(&mut self) -> Result<DriverState, CodecError> {
        if self.state.is_terminal() {
            return Ok(self.state);
        }

        match self.codec.encode_next_record(&mut self.source)? {
            Some(record) => {
                self.sink.write_all(record.as_bytes())?;
                self.stats.records += 1;
                self.stats.bytes_written += RECORD_STRIDE as u64;
                tracing::trace!(record = self.stats.records - 1, "record written");
            }
            None => {
                self.state = DriverState::Exhausted;
            }
        }
        self.stats.lines_read = self.source.line_number();
        Ok(self.state)
    }

    /// Convert until the source is exhausted, then flush the sink
    ///
    /// # Errors
    /// Returns the first record error; the index of the failing record equals
    /// [`Driver::stats`]`.records` at that point.
    pub fn run(&mut self) -> Result<ConversionStats, CodecError> {
        while !self.step()?.is_terminal() {}
        self.sink.flush()?;
        Ok(self.stats)
    }

    /// Unwrap the sink
    #[inline]
    #[must_use]
    pub fn into_sink(self) -> W {
        self.sink
    }
}

/// Convert a whole text stream into `sink`
///
/// # Errors
/// Returns the index of the failing record together with its error.
pub fn convert_stream<R: BufRead, W: Write>(
    codec: RecordCodec,
    source: R,
    sink: W,
) -> Result<ConversionStats, (u64, CodecError)> {
    let mut driver = Driver::new(source, sink, codec);
    driver.run().map_err(|e| (driver.stats().records, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnistbin_test_utils::{records_text, uniform_record_text};
    use std::io::Cursor;

    #[test]
    fn empty_source_exhausts_immediately() {
        let mut sink = Vec::new();
        let mut driver = Driver::new(Cursor::new(""), &mut sink, RecordCodec::default());
        assert_eq!(driver.state(), DriverState::Reading);
        assert_eq!(driver.step().unwrap(), DriverState::Exhausted);
        assert_eq!(driver.step().unwrap(), DriverState::Exhausted);
        assert_eq!(driver.stats(), ConversionStats::default());
        drop(driver);
        assert!(sink.is_empty());
    }

    #[test]
    fn step_writes_one_record() {
        let text = records_text(&[1, 2]);
        let mut driver = Driver::new(Cursor::new(text), Vec::new(), RecordCodec::default());
        assert_eq!(driver.step().unwrap(), DriverState::Reading);
        assert_eq!(driver.stats().records, 1);
        assert_eq!(driver.stats().lines_read, 29);
        assert_eq!(driver.step().unwrap(), DriverState::Reading);
        assert_eq!(driver.step().unwrap(), DriverState::Exhausted);
        assert_eq!(driver.into_sink().len(), 2 * RECORD_STRIDE);
    }

    #[test]
    fn failing_record_leaves_no_bytes() {
        let mut text = uniform_record_text(4, 0);
        text.push_str("9\n1 2 3\n");
        let mut sink = Vec::new();
        let (index, err) =
            convert_stream(RecordCodec::default(), Cursor::new(text), &mut sink).unwrap_err();
        assert_eq!(index, 1);
        assert!(err.is_count_mismatch());
        assert_eq!(sink.len(), RECORD_STRIDE);
    }

    #[test]
    fn convert_stream_reports_stats() {
        let stats = convert_stream(
            RecordCodec::default(),
            Cursor::new(records_text(&[0, 1, 2])),
            std::io::sink(),
        )
        .unwrap();
        assert_eq!(stats.records, 3);
        assert_eq!(stats.bytes_written, 3 * RECORD_STRIDE as u64);
        assert_eq!(stats.lines_read, 87);
    }
}
