//! Conversion configuration
//!
//! Loaded from an optional TOML file; every field has a default so an empty
//! file (or no file) converts `train` and `test` in the current directory.
//!
//! ```toml
//! input_dir = "data/text"
//! output_dir = "data/bin"
//! datasets = ["train", "test"]
//! byte_order = "little"
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use mnistbin_codec::ByteOrder;
use serde::{Deserialize, Serialize};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`ConvertConfig`]
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Values parsed but are unusable
    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// Which datasets to convert and where their files live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ConvertConfig {
    /// Directory holding `<name>.<input_extension>` files
    pub input_dir: PathBuf,
    /// Directory receiving `<name>.<output_extension>` files
    pub output_dir: PathBuf,
    /// Dataset names, converted in order
    pub datasets: Vec<String>,
    /// Extension of text inputs
    pub input_extension: String,
    /// Extension of binary outputs
    pub output_extension: String,
    /// Byte order of the label field
    pub byte_order: ByteOrder,
}

impl ConvertConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// With dataset list
    #[must_use]
    pub fn with_datasets<I, S>(mut self, datasets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.datasets = datasets.into_iter().map(Into::into).collect();
        self
    }

    /// With input directory
    #[inline]
    #[must_use]
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    /// With output directory
    #[inline]
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// With label byte order
    #[inline]
    #[must_use]
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Text input path of a dataset
    #[must_use]
    pub fn input_path(&self, name: &str) -> PathBuf {
        self.input_dir.join(format!("{name}.{}", self.input_extension))
    }

    /// Binary output path of a dataset
    #[must_use]
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{name}.{}", self.output_extension))
    }

    /// Validate configuration values
    ///
    /// # Errors
    /// Returns [`ConfigError::Validation`] for an empty dataset list, empty or
    /// duplicate names, names containing path separators, or empty extensions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.datasets.is_empty() {
            return Err(ConfigError::Validation(
                "datasets must name at least one dataset".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for name in &self.datasets {
            if name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "dataset names must not be empty".to_string(),
                ));
            }
            if name.contains(['/', '\\']) || name == ".." {
                return Err(ConfigError::Validation(format!(
                    "dataset name '{name}' must not contain path separators"
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "dataset '{name}' is listed more than once"
                )));
            }
        }

        if self.input_extension.is_empty() || self.output_extension.is_empty() {
            return Err(ConfigError::Validation(
                "file extensions must not be empty".to_string(),
            ));
        }
        if self.input_extension == self.output_extension && self.input_dir == self.output_dir {
            return Err(ConfigError::Validation(format!(
                "output would overwrite input: both use '.{}' in {}",
                self.input_extension,
                self.input_dir.display()
            )));
        }
        Ok(())
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            datasets: vec!["train".to_string(), "test".to_string()],
            input_extension: "txt".to_string(),
            output_extension: "bin".to_string(),
            byte_order: ByteOrder::Native,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_convert_train_and_test() {
        let config = ConvertConfig::new();
        assert_eq!(config.datasets, vec!["train", "test"]);
        assert_eq!(config.input_path("train"), PathBuf::from("./train.txt"));
        assert_eq!(config.output_path("test"), PathBuf::from("./test.bin"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ConvertConfig = toml::from_str(
            r#"
            output_dir = "out"
            byte_order = "big"
            "#,
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.byte_order, ByteOrder::Big);
        assert_eq!(config.datasets, vec!["train", "test"]);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<ConvertConfig, _> = toml::from_str("compression = true");
        assert!(result.is_err());
    }

    #[test]
    fn builder_overrides() {
        let config = ConvertConfig::new()
            .with_datasets(["validation"])
            .with_input_dir("in")
            .with_output_dir("out")
            .with_byte_order(ByteOrder::Little);
        assert_eq!(config.input_path("validation"), PathBuf::from("in/validation.txt"));
        assert_eq!(config.output_path("validation"), PathBuf::from("out/validation.bin"));
        assert_eq!(config.byte_order, ByteOrder::Little);
    }

    #[test]
    fn validation_rejects_bad_dataset_lists() {
        let empty = ConvertConfig::new().with_datasets(Vec::<String>::new());
        assert!(matches!(empty.validate(), Err(ConfigError::Validation(_))));

        let dup = ConvertConfig::new().with_datasets(["train", "train"]);
        assert!(matches!(dup.validate(), Err(ConfigError::Validation(_))));

        let sep = ConvertConfig::new().with_datasets(["../train"]);
        assert!(matches!(sep.validate(), Err(ConfigError::Validation(_))));

        let blank = ConvertConfig::new().with_datasets([" "]);
        assert!(matches!(blank.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validation_rejects_output_over_input() {
        let mut config = ConvertConfig::new();
        config.output_extension = "txt".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_missing_file_is_io_error() {
        let err = ConvertConfig::load_from(Path::new("/nonexistent/mnistbin.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
