//! Fixed binary record layout
//!
//! One record is `{ i32 label; u8 pixels[784] }` with no padding:
//!
//! | offset | size | field  |
//! |--------|------|--------|
//! | 0      | 4    | label  |
//! | 4      | 784  | pixels |

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Pixel rows per image
pub const IMAGE_ROWS: usize = 28;

/// Pixel columns per image
pub const IMAGE_COLS: usize = 28;

/// Pixels per image (row-major)
pub const IMAGE_PIXEL_COUNT: usize = IMAGE_ROWS * IMAGE_COLS;

/// Size of the label field in bytes
pub const LABEL_SIZE: usize = std::mem::size_of::<i32>();

/// Byte offset of the pixel block
pub const PIXELS_OFFSET: usize = LABEL_SIZE;

/// Length of one binary record in bytes
pub const RECORD_STRIDE: usize = LABEL_SIZE + IMAGE_PIXEL_COUNT;

/// Number of label classes used by [`crate::Sample`]
pub const CLASS_COUNT: usize = 10;

/// C layout of one record, only used to check the stride at compile time.
#[allow(dead_code)]
#[repr(C)]
struct CRecord {
    label: i32,
    pixels: [u8; IMAGE_PIXEL_COUNT],
}

const _: () = assert!(std::mem::size_of::<CRecord>() == RECORD_STRIDE);
const _: () = assert!(std::mem::offset_of!(CRecord, pixels) == PIXELS_OFFSET);
const _: () = assert!(RECORD_STRIDE == 788);

/// Byte order of the label field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Host byte order (bit-compatible with files written by a native struct dump)
    #[default]
    Native,
    /// Little endian
    Little,
    /// Big endian
    Big,
}

impl ByteOrder {
    /// Encode a label into its 4-byte field
    #[inline]
    #[must_use]
    pub const fn encode_label(self, label: i32) -> [u8; LABEL_SIZE] {
        match self {
            Self::Native => label.to_ne_bytes(),
            Self::Little => label.to_le_bytes(),
            Self::Big => label.to_be_bytes(),
        }
    }

    /// Decode a label from its 4-byte field
    #[inline]
    #[must_use]
    pub const fn decode_label(self, bytes: [u8; LABEL_SIZE]) -> i32 {
        match self {
            Self::Native => i32::from_ne_bytes(bytes),
            Self::Little => i32::from_le_bytes(bytes),
            Self::Big => i32::from_be_bytes(bytes),
        }
    }

    /// Name as used in configuration files
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Little => "little",
            Self::Big => "big",
        }
    }
}

impl Display for ByteOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ByteOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "little" | "le" => Ok(Self::Little),
            "big" | "be" => Ok(Self::Big),
            other => Err(format!(
                "unknown byte order '{other}', expected native, little or big"
            )),
        }
    }
}
