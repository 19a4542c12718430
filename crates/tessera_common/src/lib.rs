//! Shared foundational types used across the tessera configuration-space tools.
//!
//! This crate provides the tile-kind tag, grid geometry with its reserved
//! control cells, alphabet symbol IDs, and the warning sink used by the
//! line-oriented input parsers.

#![warn(missing_docs)]

pub mod grid;
pub mod ids;
pub mod sink;
pub mod tile;

pub use grid::{Grid, GridError, Position};
pub use ids::SymbolId;
pub use sink::{InputWarning, WarningSink};
pub use tile::{configuration_name, memory_count_allowed, TileKind, ALLOWED_MEMORY_COUNTS};
