//! Error types for writing configurations and index files.

use std::path::PathBuf;

/// Errors that can occur while writing output.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// A file or directory operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The path involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// More lines were requested than the input holds.
    #[error("cannot pick {requested} lines, the file has only {available}")]
    NotEnoughLines {
        /// Number of lines requested.
        requested: usize,
        /// Number of lines present.
        available: usize,
    },

    /// A sharder was asked for zero partitions.
    #[error("at least one output partition is required")]
    NoPartitions,

    /// A configuration was routed to a partition that does not exist.
    #[error("partition {shard} does not exist, there are {partitions}")]
    UnknownPartition {
        /// The requested partition index.
        shard: usize,
        /// Number of partitions.
        partitions: usize,
    },
}

impl EmitError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
