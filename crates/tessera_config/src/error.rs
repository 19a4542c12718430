//! Error types for input loading and validation.

use std::path::PathBuf;

use tessera_common::GridError;

/// Errors that can occur when loading or validating run inputs.
///
/// Individual malformed lines are not errors: they are skipped and reported
/// through a [`WarningSink`](tessera_common::WarningSink). These variants
/// cover problems that leave no usable value behind.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading an input file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A required section marker pair is absent from the tile-info file.
    #[error("missing section {start}/{end}")]
    MissingSection {
        /// The opening marker.
        start: &'static str,
        /// The closing marker.
        end: &'static str,
    },

    /// A required key is missing from the space descriptor.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A required accelerator has no entry in the tile catalog.
    #[error("unknown accelerator '{0}'")]
    UnknownAccelerator(String),

    /// The grid dimensions are unusable.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}

impl ConfigError {
    /// Wraps an I/O error with the path that produced it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
