//! In-memory record types
//!
//! [`TextRecord`] is the validated form of one labeled image.
//! [`BinaryRecord`] is its fixed-width on-disk form.

use crate::error::CodecError;
use crate::layout::{IMAGE_COLS, IMAGE_PIXEL_COUNT, RECORD_STRIDE};

/// One labeled image with exactly [`IMAGE_PIXEL_COUNT`] pixels
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextRecord {
    label: i32,
    pixels: [u8; IMAGE_PIXEL_COUNT],
}

impl TextRecord {
    /// Create from a label and a full pixel grid
    #[inline]
    #[must_use]
    pub const fn new(label: i32, pixels: [u8; IMAGE_PIXEL_COUNT]) -> Self {
        Self { label, pixels }
    }

    /// Create from a pixel slice
    ///
    /// # Errors
    /// Returns [`CodecError::PixelCountMismatch`] unless the slice holds
    /// exactly [`IMAGE_PIXEL_COUNT`] values. The error carries line 0 since
    /// there is no text source.
    pub fn from_slice(label: i32, pixels: &[u8]) -> Result<Self, CodecError> {
        let pixels: [u8; IMAGE_PIXEL_COUNT] =
            pixels
                .try_into()
                .map_err(|_| CodecError::PixelCountMismatch {
                    line: 0,
                    actual: pixels.len(),
                })?;
        Ok(Self { label, pixels })
    }

    /// Class label
    #[inline]
    #[must_use]
    pub const fn label(&self) -> i32 {
        self.label
    }

    /// Pixels in row-major order
    #[inline]
    #[must_use]
    pub const fn pixels(&self) -> &[u8; IMAGE_PIXEL_COUNT] {
        &self.pixels
    }

    /// Pixel at `(row, col)`
    ///
    /// # Panics
    /// Panics if `row` or `col` is out of the 28×28 grid.
    #[inline]
    #[must_use]
    pub fn pixel(&self, row: usize, col: usize) -> u8 {
        assert!(col < IMAGE_COLS, "column {col} out of range");
        self.pixels[row * IMAGE_COLS + col]
    }

    /// Iterate over pixel rows
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks_exact(IMAGE_COLS)
    }
}

/// One encoded record, always [`RECORD_STRIDE`] bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinaryRecord([u8; RECORD_STRIDE]);

impl BinaryRecord {
    /// Wrap already-encoded bytes
    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; RECORD_STRIDE]) -> Self {
        Self(bytes)
    }

    /// Copy from a byte slice
    ///
    /// # Errors
    /// Returns [`CodecError::InvalidRecordLength`] if the slice is not one
    /// stride long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CodecError> {
        let arr: [u8; RECORD_STRIDE] =
            bytes
                .try_into()
                .map_err(|_| CodecError::InvalidRecordLength {
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    /// Encoded bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; RECORD_STRIDE] {
        &self.0
    }

    /// Convert to byte array (consumes self)
    #[inline]
    #[must_use]
    pub const fn into_bytes(self) -> [u8; RECORD_STRIDE] {
        self.0
    }

    /// Always [`RECORD_STRIDE`]
    #[inline]
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn len(&self) -> usize {
        RECORD_STRIDE
    }

    /// Never empty
    #[inline]
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl AsRef<[u8]> for BinaryRecord {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::IMAGE_ROWS;

    fn gradient() -> [u8; IMAGE_PIXEL_COUNT] {
        let mut pixels = [0u8; IMAGE_PIXEL_COUNT];
        for (i, p) in pixels.iter_mut().enumerate() {
            *p = (i % 256) as u8;
        }
        pixels
    }

    #[test]
    fn pixel_indexing_is_row_major() {
        let record = TextRecord::new(3, gradient());
        assert_eq!(record.pixel(0, 0), 0);
        assert_eq!(record.pixel(0, 27), 27);
        assert_eq!(record.pixel(1, 0), 28);
        assert_eq!(record.rows().count(), IMAGE_ROWS);
        assert!(record.rows().all(|r| r.len() == IMAGE_COLS));
    }

    #[test]
    fn from_slice_rejects_wrong_count() {
        let err = TextRecord::from_slice(0, &[0u8; 783]).unwrap_err();
        assert!(matches!(err, CodecError::PixelCountMismatch { actual: 783, .. }));
        assert!(TextRecord::from_slice(0, &[0u8; IMAGE_PIXEL_COUNT]).is_ok());
    }

    #[test]
    fn binary_record_from_slice_checks_length() {
        assert!(BinaryRecord::from_slice(&[0u8; RECORD_STRIDE]).is_ok());
        let err = BinaryRecord::from_slice(&[0u8; 787]).unwrap_err();
        assert!(matches!(err, CodecError::InvalidRecordLength { actual: 787 }));
    }

    #[test]
    fn binary_record_len_is_stride() {
        let record = BinaryRecord::from_bytes([0u8; RECORD_STRIDE]);
        assert_eq!(record.len(), RECORD_STRIDE);
        assert_eq!(record.as_ref().len(), RECORD_STRIDE);
        assert!(!record.is_empty());
    }
}
