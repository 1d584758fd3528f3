//! Dataset-level conversion
//!
//! For each configured dataset, `<input_dir>/<name>.txt` is converted into
//! `<output_dir>/<name>.bin`. Output goes to a temporary file in the output
//! directory and is renamed into place only after the whole dataset
//! converted, so a failed run never leaves a partial `.bin` behind.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use mnistbin_codec::{RecordCodec, RecordReader, RECORD_STRIDE};
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::config::ConvertConfig;
use crate::driver::{ConversionStats, Driver};
use crate::error::ConvertError;

/// Result of converting one dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetReport {
    /// Dataset name
    pub name: String,
    /// Text file read
    pub input: PathBuf,
    /// Binary file written
    pub output: PathBuf,
    /// Counters
    pub stats: ConversionStats,
}

impl Display for DatasetReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} records ({} bytes) from {} to {}",
            self.name,
            self.stats.records,
            self.stats.bytes_written,
            self.input.display(),
            self.output.display()
        )
    }
}

/// Contents of one binary dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    /// Dataset name
    pub name: String,
    /// Binary file read
    pub path: PathBuf,
    /// Number of records
    pub records: u64,
    /// Records per label
    pub labels: BTreeMap<i32, u64>,
}

impl Display for DatasetSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} records in {}",
            self.name,
            self.records,
            self.path.display()
        )?;
        for (label, count) in &self.labels {
            writeln!(f, "  label {label:>4}: {count}")?;
        }
        Ok(())
    }
}

/// Converts the datasets named in a [`ConvertConfig`]
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConvertConfig,
    codec: RecordCodec,
}

impl Converter {
    /// Create a converter from a validated configuration
    ///
    /// # Errors
    /// Returns [`ConvertError::Config`] if the configuration is invalid.
    pub fn new(config: ConvertConfig) -> Result<Self, ConvertError> {
        config.validate()?;
        let codec = RecordCodec::new(config.byte_order);
        Ok(Self { config, codec })
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Convert every configured dataset in order, stopping at the first failure
    ///
    /// # Errors
    /// Returns the error of the first dataset that failed.
    pub fn convert_all(&self) -> Result<Vec<DatasetReport>, ConvertError> {
        self.config
            .datasets
            .iter()
            .map(|name| self.convert_dataset(name))
            .collect()
    }

    /// Convert one dataset
    ///
    /// # Errors
    /// - [`ConvertError::Io`] if the input cannot be opened or the output
    ///   cannot be created or finalized
    /// - [`ConvertError::Record`] for the first malformed record
    pub fn convert_dataset(&self, name: &str) -> Result<DatasetReport, ConvertError> {
        let input = self.config.input_path(name);
        let output = self.config.output_path(name);
        tracing::info!(
            dataset = name,
            input = %input.display(),
            output = %output.display(),
            byte_order = %self.codec.byte_order(),
            "converting dataset"
        );

        let source = File::open(&input).map_err(|e| ConvertError::io_error(&input, e))?;
        let out_dir = &self.config.output_dir;
        std::fs::create_dir_all(out_dir).map_err(|e| ConvertError::io_error(out_dir, e))?;
        let temp = NamedTempFile::new_in(out_dir).map_err(|e| ConvertError::io_error(out_dir, e))?;

        let mut driver = Driver::new(BufReader::new(source), BufWriter::new(temp), self.codec);
        let stats = match driver.run() {
            Ok(stats) => stats,
            Err(source) => {
                let record = driver.stats().records;
                tracing::error!(dataset = name, record, error = %source, "conversion aborted");
                return Err(ConvertError::record(name, record, source));
            }
        };

        let temp = driver
            .into_sink()
            .into_inner()
            .map_err(|e| ConvertError::io_error(&output, e.into_error()))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| ConvertError::io_error(&output, e))?;
        temp.persist(&output)
            .map_err(|e| ConvertError::io_error(&output, e.error))?;

        tracing::info!(
            dataset = name,
            records = stats.records,
            bytes = stats.bytes_written,
            "dataset converted"
        );
        Ok(DatasetReport {
            name: name.to_string(),
            input,
            output,
            stats,
        })
    }

    /// Summarize every configured dataset's binary file
    ///
    /// # Errors
    /// Returns the error of the first dataset that could not be read.
    pub fn inspect_all(&self) -> Result<Vec<DatasetSummary>, ConvertError> {
        self.config
            .datasets
            .iter()
            .map(|name| self.inspect(name))
            .collect()
    }

    /// Summarize one dataset's binary file
    ///
    /// # Errors
    /// - [`ConvertError::Io`] if the file cannot be read
    /// - [`ConvertError::TruncatedBinary`] if its length is not a stride multiple
    pub fn inspect(&self, name: &str) -> Result<DatasetSummary, ConvertError> {
        let path = self.config.output_path(name);
        inspect_file(name, &path, self.codec)
    }
}

/// Summarize a binary record file
///
/// # Errors
/// See [`Converter::inspect`].
pub fn inspect_file(
    name: &str,
    path: &Path,
    codec: RecordCodec,
) -> Result<DatasetSummary, ConvertError> {
    let file = File::open(path).map_err(|e| ConvertError::io_error(path, e))?;
    let len = file
        .metadata()
        .map_err(|e| ConvertError::io_error(path, e))?
        .len();
    if len % RECORD_STRIDE as u64 != 0 {
        return Err(ConvertError::TruncatedBinary {
            path: path.to_path_buf(),
            len,
        });
    }

    let mut summary = DatasetSummary {
        name: name.to_string(),
        path: path.to_path_buf(),
        ..DatasetSummary::default()
    };
    for record in RecordReader::new(BufReader::new(file), codec) {
        let record = record.map_err(|e| ConvertError::record(name, summary.records, e))?;
        *summary.labels.entry(record.label()).or_default() += 1;
        summary.records += 1;
    }
    tracing::debug!(dataset = name, records = summary.records, "dataset inspected");
    Ok(summary)
}
