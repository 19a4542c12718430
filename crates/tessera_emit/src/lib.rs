//! Output of expanded configurations.
//!
//! - [`Sharder`] spreads accepted configurations round-robin over `N`
//!   partition directories, each with its own `index.txt`.
//! - [`write_single`] writes one configuration for minimal-mode runs.
//! - [`shuffle_lines`] and [`pick_lines`] post-process finished index files.

#![warn(missing_docs)]

pub mod accumulator;
pub mod error;
pub mod post;
pub mod sharder;

pub use accumulator::RoundRobin;
pub use error::EmitError;
pub use post::{pick_lines, shuffle_lines};
pub use sharder::{partition_dir, write_single, PartitionSummary, Sharder, CCF_EXTENSION, INDEX_FILE};
