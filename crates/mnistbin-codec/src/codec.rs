//! Record codec
//!
//! Text form of one record:
//!
//! ```text
//! <label>
//! <28 lines of whitespace-separated pixel tokens>
//! ```
//!
//! Tokens that are not made entirely of ASCII digits are dropped, so `-3`
//! and `4a` contribute nothing. After the 28 rows exactly 784 pixels must
//! have been collected.

use std::io::BufRead;

use crate::error::CodecError;
use crate::layout::{
    ByteOrder, IMAGE_PIXEL_COUNT, IMAGE_ROWS, LABEL_SIZE, PIXELS_OFFSET, RECORD_STRIDE,
};
use crate::record::{BinaryRecord, TextRecord};
use crate::source::LineSource;

/// Stateless encoder/decoder between text and binary records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordCodec {
    byte_order: ByteOrder,
}

impl RecordCodec {
    /// Create a codec writing labels in `byte_order`
    #[inline]
    #[must_use]
    pub const fn new(byte_order: ByteOrder) -> Self {
        Self { byte_order }
    }

    /// Byte order of the label field
    #[inline]
    #[must_use]
    pub const fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Parse and encode the next record of `source`
    ///
    /// Returns `Ok(None)` when the source is exhausted before a label line.
    /// On success exactly 29 lines have been consumed.
    ///
    /// # Errors
    /// See [`RecordCodec::parse_record`].
    pub fn encode_next_record<R: BufRead>(
        &self,
        source: &mut LineSource<R>,
    ) -> Result<Option<BinaryRecord>, CodecError> {
        Ok(self.parse_record(source)?.map(|record| self.encode(&record)))
    }

    /// Parse the next text record of `source`
    ///
    /// # Errors
    /// - [`CodecError::MalformedLabel`] if the label line is not an `i32`
    /// - [`CodecError::PrematureEndOfInput`] if fewer than 28 rows follow
    /// - [`CodecError::PixelOutOfRange`] if a pixel token exceeds 255
    /// - [`CodecError::PixelCountMismatch`] if the rows hold other than 784 pixels
    /// - [`CodecError::Io`] on read failure
    #[allow(clippy::unused_self)]
    pub fn parse_record<R: BufRead>(
        &self,
        source: &mut LineSource<R>,
    ) -> Result<Option<TextRecord>, CodecError> {
        let label_line = source.line_number() + 1;
        let Some(text) = source.next_line()? else {
            return Ok(None);
        };
        let label = text
            .trim()
            .parse::<i32>()
            .map_err(|source| CodecError::MalformedLabel {
                line: label_line,
                content: text.to_string(),
                source,
            })?;

        let mut pixels = PixelBuffer::new();
        for row in 0..IMAGE_ROWS {
            let line = source.line_number() + 1;
            let Some(text) = source.next_line()? else {
                return Err(CodecError::PrematureEndOfInput {
                    line: line - 1,
                    rows_read: row,
                    pixels: pixels.len(),
                });
            };
            let dropped = pixels.scan_row(text, line)?;
            if dropped > 0 {
                tracing::warn!(line, dropped, "dropped non-numeric pixel tokens");
            }
        }

        let record = pixels.finish(label, source.line_number())?;
        tracing::trace!(line = label_line, label, "parsed record");
        Ok(Some(record))
    }

    /// Pack a record into its fixed-width layout
    #[must_use]
    pub fn encode(&self, record: &TextRecord) -> BinaryRecord {
        let mut bytes = [0u8; RECORD_STRIDE];
        bytes[..LABEL_SIZE].copy_from_slice(&self.byte_order.encode_label(record.label()));
        bytes[PIXELS_OFFSET..].copy_from_slice(record.pixels());
        BinaryRecord::from_bytes(bytes)
    }

    /// Unpack an encoded record
    #[must_use]
    pub fn decode_record(&self, record: &BinaryRecord) -> TextRecord {
        let bytes = record.as_bytes();
        let mut label = [0u8; LABEL_SIZE];
        label.copy_from_slice(&bytes[..LABEL_SIZE]);
        let mut pixels = [0u8; IMAGE_PIXEL_COUNT];
        pixels.copy_from_slice(&bytes[PIXELS_OFFSET..]);
        TextRecord::new(self.byte_order.decode_label(label), pixels)
    }

    /// Unpack a raw buffer
    ///
    /// # Errors
    /// Returns [`CodecError::InvalidRecordLength`] unless `bytes` is exactly
    /// one stride long.
    pub fn decode(&self, bytes: &[u8]) -> Result<TextRecord, CodecError> {
        let record = BinaryRecord::from_slice(bytes)?;
        Ok(self.decode_record(&record))
    }
}

/// Pixels collected across the rows of one record
///
/// Counts every accepted token, even past capacity, so the final check sees
/// the real total.
struct PixelBuffer {
    pixels: [u8; IMAGE_PIXEL_COUNT],
    count: usize,
}

impl PixelBuffer {
    fn new() -> Self {
        Self {
            pixels: [0u8; IMAGE_PIXEL_COUNT],
            count: 0,
        }
    }

    fn len(&self) -> usize {
        self.count
    }

    /// Append the digit-only tokens of one row, returning how many were dropped
    fn scan_row(&mut self, text: &str, line: u64) -> Result<usize, CodecError> {
        let mut dropped = 0;
        for token in text.split_whitespace() {
            if !token.bytes().all(|b| b.is_ascii_digit()) {
                dropped += 1;
                continue;
            }
            let value = token
                .parse::<u8>()
                .map_err(|_| CodecError::PixelOutOfRange {
                    line,
                    token: token.to_string(),
                })?;
            if let Some(slot) = self.pixels.get_mut(self.count) {
                *slot = value;
            }
            self.count += 1;
        }
        Ok(dropped)
    }

    fn finish(self, label: i32, line: u64) -> Result<TextRecord, CodecError> {
        if self.count != IMAGE_PIXEL_COUNT {
            return Err(CodecError::PixelCountMismatch {
                line,
                actual: self.count,
            });
        }
        Ok(TextRecord::new(label, self.pixels))
    }
}
