//! Splitting the memory budget across memory tiles.

use crate::error::ExpandError;

/// Main-memory budget shared by all memory tiles.
pub const TOTAL_MAIN_BUDGET: u32 = 2048;

/// Smallest main-memory size that still boots.
pub const MIN_MAIN: u32 = 1024;

/// Per-tile memory sizes written as `CONFIG_MEM_SIZE_MAIN` / `CONFIG_MEM_SIZE_SECONDARY`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemorySizes {
    /// Size of the main memory tile.
    pub main: u32,
    /// Size of each secondary memory tile.
    pub secondary: u32,
}

impl MemorySizes {
    /// Splits the budget across `memory_tiles` tiles.
    ///
    /// `main = max(2048 / n, 1024)`; `secondary = 2048 / (n - 1)` for `n > 1`,
    /// otherwise 1024.
    pub fn split(memory_tiles: usize) -> Result<Self, ExpandError> {
        if memory_tiles == 0 {
            return Err(ExpandError::NoMemoryTiles);
        }
        let budget = TOTAL_MAIN_BUDGET as usize;
        let main = (budget / memory_tiles).max(MIN_MAIN as usize) as u32;
        let secondary = if memory_tiles > 1 {
            (budget / (memory_tiles - 1)) as u32
        } else {
            MIN_MAIN
        };
        Ok(Self { main, secondary })
    }
}
