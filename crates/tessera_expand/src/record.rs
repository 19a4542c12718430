//! Concrete per-tile records of an expanded configuration.

use tessera_common::{Position, TileKind};

/// Clock domain of the CPU tile.
pub const CPU_DOMAIN: u32 = 1;
/// Clock domain shared by enumerated accelerators.
pub const ACCELERATOR_DOMAIN: u32 = 2;
/// Clock domain of unclocked tiles (I/O, memory, empty).
pub const DEFAULT_DOMAIN: u32 = 0;

/// Everything written for one grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileRecord {
    /// Cell coordinates.
    pub position: Position,
    /// What the cell holds.
    pub kind: TileKind,
    /// Label written as `TILE_<y>_<x>`: `cpu`, `IO`, `mem`, `empty`, or the
    /// accelerator's output tag.
    pub label: String,
    /// Clock domain index.
    pub clock_domain: u32,
    /// Whether this tile drives its domain's PLL.
    pub has_pll: bool,
    /// Bandwidth class; zero for non-accelerators.
    pub bandwidth: u32,
    /// Replicated cores; zero for non-accelerators.
    pub cores: u32,
}

impl TileRecord {
    /// The CPU tile.
    pub fn cpu(position: Position) -> Self {
        Self::fixed(position, TileKind::Cpu, "cpu", CPU_DOMAIN)
    }

    /// The I/O tile.
    pub fn io(position: Position) -> Self {
        Self::fixed(position, TileKind::Io, "IO", DEFAULT_DOMAIN)
    }

    /// A memory tile.
    pub fn memory(position: Position) -> Self {
        Self::fixed(position, TileKind::Memory, "mem", DEFAULT_DOMAIN)
    }

    /// An empty tile.
    pub fn empty(position: Position) -> Self {
        Self::fixed(position, TileKind::Empty, "empty", DEFAULT_DOMAIN)
    }

    /// An accelerator tile.
    pub fn accelerator(
        position: Position,
        name: &str,
        esp_tag: &str,
        parallelism: u32,
        clock_domain: u32,
        bandwidth: u32,
    ) -> Self {
        Self {
            position,
            kind: TileKind::accelerator(name, parallelism),
            label: esp_tag.to_string(),
            clock_domain,
            has_pll: false,
            bandwidth,
            cores: parallelism,
        }
    }

    fn fixed(position: Position, kind: TileKind, label: &str, clock_domain: u32) -> Self {
        Self {
            position,
            kind,
            label: label.to_string(),
            clock_domain,
            has_pll: false,
            bandwidth: 0,
            cores: 0,
        }
    }
}
