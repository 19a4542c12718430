//! The kind of functional unit held by one grid tile.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a single tile of the SoC grid contains.
///
/// Two accelerator tiles compare equal when they share both the accelerator
/// name and the parallelism level, so a multiset of `TileKind` values collapses
/// identical accelerator instances.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum TileKind {
    /// An unused slot.
    Empty,
    /// A memory controller tile.
    Memory,
    /// The fixed processor tile.
    Cpu,
    /// The fixed I/O tile.
    Io,
    /// A hardware accelerator instantiated with `parallelism` replicated cores.
    Accelerator {
        /// Catalog name of the accelerator.
        name: String,
        /// Number of replicated cores (e.g. 1, 2, 4).
        parallelism: u32,
    },
}

impl TileKind {
    /// Creates an accelerator tile kind.
    pub fn accelerator(name: impl Into<String>, parallelism: u32) -> Self {
        TileKind::Accelerator {
            name: name.into(),
            parallelism,
        }
    }

    /// Returns `true` for the two fixed control tiles (CPU and I/O).
    pub fn is_fixed(&self) -> bool {
        matches!(self, TileKind::Cpu | TileKind::Io)
    }

    /// Returns `true` for tiles that need a clock source of their own.
    ///
    /// Only clocked tiles take part in PLL ownership.
    pub fn is_clocked(&self) -> bool {
        matches!(self, TileKind::Cpu | TileKind::Accelerator { .. })
    }

    /// Returns the accelerator name, if this is an accelerator tile.
    pub fn accelerator_name(&self) -> Option<&str> {
        match self {
            TileKind::Accelerator { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns the tag used in configuration names: `EMPTY`, `MEM`, `CPU`,
    /// `IO`, or `<accelerator>x<parallelism>`.
    pub fn tag(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileKind::Empty => write!(f, "EMPTY"),
            TileKind::Memory => write!(f, "MEM"),
            TileKind::Cpu => write!(f, "CPU"),
            TileKind::Io => write!(f, "IO"),
            TileKind::Accelerator { name, parallelism } => write!(f, "{name}x{parallelism}"),
        }
    }
}

/// Memory-tile counts a configuration may have.
pub const ALLOWED_MEMORY_COUNTS: [usize; 3] = [1, 2, 4];

/// Returns `true` if `count` memory tiles is an allowed configuration.
pub fn memory_count_allowed(count: usize) -> bool {
    ALLOWED_MEMORY_COUNTS.contains(&count)
}

/// Builds the canonical configuration name from the non-fixed tiles in scan order.
///
/// The name is `config` followed by `_<TAG>` for each tile, e.g.
/// `config_MEM_AESx2_EMPTY`. It doubles as the output file stem and the
/// index-file entry.
pub fn configuration_name<'a>(tiles: impl IntoIterator<Item = &'a TileKind>) -> String {
    let mut name = String::from("config");
    for tile in tiles.into_iter().filter(|t| !t.is_fixed()) {
        name.push('_');
        name.push_str(&tile.tag());
    }
    name
}
