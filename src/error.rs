//! Error type for config binding

use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a bind before any flag is touched.
///
/// All of them come from locating or reading the config file; values that do
/// not fit a flag are logged and skipped instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The home directory could not be resolved while searching for a config file.
    #[error("unable to resolve home directory for config search")]
    EnvironmentFailure,

    /// A config file was found but its contents are malformed.
    #[error("failed to parse {format} config {}: {message}", path.display())]
    ParseFailure { path: PathBuf, format: &'static str, message: String },

    /// The config file exists but could not be read.
    #[error("failed reading config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An explicit config path has an extension no loader understands.
    #[error("unsupported config extension '.{extension}' for file {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
