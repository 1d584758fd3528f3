//! Record codec for labeled 28×28 images
//!
//! Converts the text form of a labeled image (one label line followed by 28
//! rows of pixel tokens) into a fixed-width 788-byte binary record, and back.
//!
//! # Core Concepts
//!
//! - [`TextRecord`]: validated label plus 784 pixels
//! - [`BinaryRecord`]: the 788-byte on-disk form
//! - [`RecordCodec`]: parse, encode and decode
//! - [`LineSource`]: line reader feeding the codec
//! - [`RecordReader`]: streaming iterator over a binary file
//! - [`Sample`]: one-hot/normalized training view
//!
//! # Example
//!
//! ```rust,ignore
//! use mnistbin_codec::{LineSource, RecordCodec};
//!
//! let mut source = LineSource::new(std::io::BufReader::new(file));
//! let codec = RecordCodec::default();
//! while let Some(record) = codec.encode_next_record(&mut source)? {
//!     sink.write_all(record.as_bytes())?;
//! }
//! ```

#![warn(unreachable_pub)]

mod codec;
mod error;
mod layout;
mod reader;
mod record;
mod sample;
mod source;

pub use codec::RecordCodec;
pub use error::CodecError;
pub use layout::{
    ByteOrder, CLASS_COUNT, IMAGE_COLS, IMAGE_PIXEL_COUNT, IMAGE_ROWS, LABEL_SIZE, PIXELS_OFFSET,
    RECORD_STRIDE,
};
pub use reader::RecordReader;
pub use record::{BinaryRecord, TextRecord};
pub use sample::Sample;
pub use source::LineSource;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
