//! Error types for configuration expansion and `.ccf` parsing.

use std::path::PathBuf;

use tessera_common::{GridError, Position, TileKind};

/// Fatal errors raised while turning an assignment into a [`Configuration`](crate::Configuration).
///
/// Any of these means the configuration being built is structurally wrong;
/// nothing derived from it should be written.
#[derive(Debug, thiserror::Error)]
pub enum ExpandError {
    /// Two placement entries claim the same cell.
    #[error("position {position} is already filled")]
    PlacementConflict {
        /// The contested cell.
        position: Position,
    },

    /// More tiles were declared than the grid can hold next to the CPU and I/O tiles.
    #[error("{declared} tiles declared, but only {available} cells are free")]
    GridOverflow {
        /// Number of declared (or enumerated) tiles.
        declared: usize,
        /// Number of cells they may occupy.
        available: usize,
    },

    /// Cells remain empty after the CPU and I/O tiles are placed.
    #[error("{count} cells cannot be filled")]
    UnfilledTiles {
        /// Number of cells left without a tile.
        count: usize,
    },

    /// A placement entry lies outside the grid.
    #[error("position {position} is outside the {width}x{height} grid")]
    OutOfBounds {
        /// The offending position.
        position: Position,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },

    /// An accelerator names a clock domain the placement did not declare.
    #[error("clock domain {domain} at {position} exceeds the {domains} declared domains")]
    ClockDomainOutOfRange {
        /// The accelerator's position.
        position: Position,
        /// The requested domain.
        domain: u32,
        /// Number of declared domains.
        domains: u32,
    },

    /// A placement names a CPU or I/O tile; those cells are assigned by expansion.
    #[error("{kind} tile at {position} cannot be placed explicitly")]
    FixedTileDeclared {
        /// Where the tile was declared.
        position: Position,
        /// The fixed kind.
        kind: TileKind,
    },

    /// A configuration does not hold exactly one tile of a fixed kind.
    #[error("expected exactly one {kind} tile, found {count}")]
    FixedTileCount {
        /// The fixed kind.
        kind: TileKind,
        /// How many were present.
        count: usize,
    },

    /// An accelerator is missing from the tile catalog.
    #[error("unknown accelerator '{0}'")]
    UnknownAccelerator(String),

    /// The configuration has no memory tile, so memory cannot be split.
    #[error("configuration has no memory tiles")]
    NoMemoryTiles,

    /// The placement input has no `NOC` header line.
    #[error("{source_name}: missing `NOC <x> <y> <domains> <accelerators>` header")]
    MissingHeader {
        /// Name of the input.
        source_name: String,
    },

    /// The declared grid is unusable.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// A placement file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors raised while reading a `.ccf` file back into a configuration.
#[derive(Debug, thiserror::Error)]
pub enum CcfError {
    /// A non-blank line is not of the form `KEY = VALUE`.
    #[error("line {line}: expected `KEY = VALUE`, found `{content}`")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        content: String,
    },

    /// A key required to rebuild the configuration is absent.
    #[error("missing key {0}")]
    MissingKey(String),

    /// A value does not parse as the expected type.
    #[error("invalid value `{value}` for {key}")]
    InvalidValue {
        /// The key.
        key: String,
        /// The raw value.
        value: String,
    },

    /// A tile label matches neither a fixed kind nor a catalog output tag.
    #[error("unknown tile `{label}` at {position}")]
    UnknownTile {
        /// Where the label was found.
        position: Position,
        /// The label.
        label: String,
    },

    /// The declared grid is unusable.
    #[error(transparent)]
    Grid(#[from] GridError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_error_display() {
        let err = ExpandError::PlacementConflict {
            position: Position::new(2, 1),
        };
        assert_eq!(err.to_string(), "position (2, 1) is already filled");

        let err = ExpandError::GridOverflow {
            declared: 5,
            available: 4,
        };
        assert_eq!(err.to_string(), "5 tiles declared, but only 4 cells are free");

        let err = ExpandError::FixedTileCount {
            kind: TileKind::Io,
            count: 0,
        };
        assert_eq!(err.to_string(), "expected exactly one IO tile, found 0");
    }

    #[test]
    fn ccf_error_display() {
        let err = CcfError::UnknownTile {
            position: Position::new(1, 0),
            label: "fft_rtl".into(),
        };
        assert_eq!(err.to_string(), "unknown tile `fft_rtl` at (1, 0)");
        assert_eq!(
            CcfError::MissingKey("CPU_ARCH".into()).to_string(),
            "missing key CPU_ARCH"
        );
    }
}
