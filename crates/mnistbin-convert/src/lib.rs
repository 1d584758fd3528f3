//! Text-to-binary conversion of labeled image datasets
//!
//! Drives [`mnistbin_codec`] over whole files: each configured dataset name
//! maps `<name>.txt` to `<name>.bin`.
//!
//! # Example
//!
//! ```rust,ignore
//! use mnistbin_convert::{ConvertConfig, Converter};
//!
//! let config = ConvertConfig::new().with_input_dir("data");
//! for report in Converter::new(config)?.convert_all()? {
//!     println!("{report}");
//! }
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod converter;
pub mod driver;
pub mod error;
pub mod logging;

pub use config::{ConfigError, ConvertConfig};
pub use converter::{inspect_file, Converter, DatasetReport, DatasetSummary};
pub use driver::{convert_stream, ConversionStats, Driver, DriverState};
pub use error::ConvertError;
pub use logging::init_logging;

pub use mnistbin_codec as codec;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
