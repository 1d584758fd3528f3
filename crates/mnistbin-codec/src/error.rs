//! Error types for the record codec
//!
//! Every variant is fatal for the dataset being converted. Line numbers are
//! 1-based positions in the text source.

use crate::layout::{IMAGE_PIXEL_COUNT, IMAGE_ROWS, RECORD_STRIDE};

/// Errors raised while parsing, encoding or decoding a record
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Label line is not a 32-bit signed integer
    #[error("line {line}: malformed label {content:?}: {source}")]
    MalformedLabel {
        line: u64,
        content: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// The pixel rows of one record did not yield exactly 784 values
    #[error(
        "record ending at line {line}: expected {} pixels in {} rows, found {actual}",
        IMAGE_PIXEL_COUNT,
        IMAGE_ROWS
    )]
    PixelCountMismatch { line: u64, actual: usize },

    /// Input ended before all pixel rows of a record were read
    #[error(
        "line {line}: input ended after {rows_read} of {} pixel rows ({pixels} pixels read)",
        IMAGE_ROWS
    )]
    PrematureEndOfInput {
        line: u64,
        rows_read: usize,
        pixels: usize,
    },

    /// A digit-only token does not fit in a byte
    #[error("line {line}: pixel value {token} is outside 0..=255")]
    PixelOutOfRange { line: u64, token: String },

    /// Buffer is not exactly one record long
    #[error("invalid record length: expected {} bytes, got {actual}", RECORD_STRIDE)]
    InvalidRecordLength { actual: usize },

    /// Underlying read or write failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Check if the error is a pixel count violation
    ///
    /// Running out of rows is a special case of a short count.
    #[inline]
    #[must_use]
    pub fn is_count_mismatch(&self) -> bool {
        matches!(
            self,
            Self::PixelCountMismatch { .. } | Self::PrematureEndOfInput { .. }
        )
    }

    /// Check if the error comes from malformed input rather than I/O
    #[inline]
    #[must_use]
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, Self::Io(_))
    }

    /// Line in the text source the error refers to, if any
    #[must_use]
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::MalformedLabel { line, .. }
            | Self::PixelCountMismatch { line, .. }
            | Self::PrematureEndOfInput { line, .. }
            | Self::PixelOutOfRange { line, .. } => Some(*line),
            Self::InvalidRecordLength { .. } | Self::Io(_) => None,
        }
    }
}
