//! Error types for dataset conversion
//!
//! Every error aborts the dataset being processed. Messages name the dataset,
//! the record index and the input line so the bad record can be found.

use std::path::PathBuf;

use mnistbin_codec::{CodecError, RECORD_STRIDE};

use crate::config::ConfigError;

/// Main conversion error type
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// A record could not be parsed, encoded or written
    #[error("dataset '{dataset}', record {record}: {source}")]
    Record {
        dataset: String,
        record: u64,
        #[source]
        source: CodecError,
    },

    /// Opening, creating or finalizing a file failed
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Binary file length is not a whole number of records
    #[error(
        "{path} is {len} bytes, not a multiple of the {} byte record stride",
        RECORD_STRIDE
    )]
    TruncatedBinary { path: PathBuf, len: u64 },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ConvertError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create record error
    pub fn record(dataset: impl Into<String>, record: u64, source: CodecError) -> Self {
        Self::Record {
            dataset: dataset.into(),
            record,
            source,
        }
    }

    /// Underlying codec error, if the failure was in a record
    #[inline]
    #[must_use]
    pub fn codec_error(&self) -> Option<&CodecError> {
        match self {
            Self::Record { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Check if the error was caused by malformed input data
    #[inline]
    #[must_use]
    pub fn is_malformed_input(&self) -> bool {
        match self {
            Self::Record { source, .. } => source.is_malformed_input(),
            Self::TruncatedBinary { .. } => true,
            Self::Io { .. } | Self::Config(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_error_message_names_dataset_and_index() {
        let err = ConvertError::record(
            "train",
            41,
            CodecError::PixelCountMismatch {
                line: 1218,
                actual: 785,
            },
        );
        let msg = err.to_string();
        assert!(msg.starts_with("dataset 'train', record 41: "));
        assert!(msg.contains("line 1218"));
        assert!(err.is_malformed_input());
        assert!(err.codec_error().unwrap().is_count_mismatch());
    }

    #[test]
    fn io_error_is_not_malformed_input() {
        let err = ConvertError::io_error("train.txt", std::io::Error::other("denied"));
        assert!(!err.is_malformed_input());
        assert!(err.codec_error().is_none());
        assert!(err.to_string().contains("train.txt"));
    }

    #[test]
    fn truncated_binary_message() {
        let err = ConvertError::TruncatedBinary {
            path: PathBuf::from("test.bin"),
            len: 1000,
        };
        assert!(err.to_string().contains("788 byte record stride"));
        assert!(err.is_malformed_input());
    }
}
