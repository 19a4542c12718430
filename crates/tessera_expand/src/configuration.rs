//! Fully expanded configurations and enumerated-mode expansion.

use tessera_common::{configuration_name, Grid, Position, TileKind};
use tessera_config::TileCatalog;

use crate::error::ExpandError;
use crate::memory::MemorySizes;
use crate::pll::assign_plls;
use crate::record::{TileRecord, ACCELERATOR_DOMAIN};

/// A complete SoC configuration: one record per grid cell, in scan order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    grid: Grid,
    cpu_arch: String,
    tiles: Vec<TileRecord>,
    memory: MemorySizes,
}

impl Configuration {
    /// Builds a configuration from one record per cell.
    ///
    /// Records are sorted into scan order, PLLs are assigned, and the memory
    /// budget is split across the memory tiles. Exactly one CPU and one I/O
    /// record must be present.
    pub fn assemble(
        grid: Grid,
        cpu_arch: impl Into<String>,
        mut tiles: Vec<TileRecord>,
    ) -> Result<Self, ExpandError> {
        if let Some(outside) = tiles.iter().find(|t| !grid.contains(t.position)) {
            return Err(ExpandError::OutOfBounds {
                position: outside.position,
                width: grid.width(),
                height: grid.height(),
            });
        }
        tiles.sort_by_key(|t| grid.index_of(t.position));
        if let Some(pair) = tiles.windows(2).find(|w| w[0].position == w[1].position) {
            return Err(ExpandError::PlacementConflict {
                position: pair[0].position,
            });
        }
        if tiles.len() < grid.cell_count() {
            return Err(ExpandError::UnfilledTiles {
                count: grid.cell_count() - tiles.len(),
            });
        }
        for fixed in [TileKind::Cpu, TileKind::Io] {
            let count = tiles.iter().filter(|t| t.kind == fixed).count();
            if count != 1 {
                return Err(ExpandError::FixedTileCount { kind: fixed, count });
            }
        }
        assign_plls(&mut tiles);
        let memory_tiles = tiles
            .iter()
            .filter(|t| t.kind == TileKind::Memory)
            .count();
        let memory = MemorySizes::split(memory_tiles)?;
        Ok(Self {
            grid,
            cpu_arch: cpu_arch.into(),
            tiles,
            memory,
        })
    }

    /// Rebuilds a configuration exactly as read, without recomputing PLLs or memory sizes.
    pub(crate) fn from_parts(
        grid: Grid,
        cpu_arch: String,
        tiles: Vec<TileRecord>,
        memory: MemorySizes,
    ) -> Self {
        Self {
            grid,
            cpu_arch,
            tiles,
            memory,
        }
    }

    /// The grid.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Processor architecture written as `CPU_ARCH`.
    pub fn cpu_arch(&self) -> &str {
        &self.cpu_arch
    }

    /// Every tile, in scan order.
    pub fn tiles(&self) -> &[TileRecord] {
        &self.tiles
    }

    /// The record at `position`, if it lies inside the grid.
    pub fn tile_at(&self, position: Position) -> Option<&TileRecord> {
        if !self.grid.contains(position) {
            return None;
        }
        self.tiles.get(self.grid.index_of(position))
    }

    /// Number of memory tiles.
    pub fn memory_tile_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.kind == TileKind::Memory)
            .count()
    }

    /// Memory sizes written into the configuration.
    pub fn memory_sizes(&self) -> MemorySizes {
        self.memory
    }

    /// The canonical name: `config` plus the tag of every non-fixed tile in scan order.
    pub fn name(&self) -> String {
        configuration_name(self.tiles.iter().map(|t| &t.kind))
    }
}

/// Expands an enumerated assignment of the free slots into a configuration.
///
/// `tiles` gives the kind of each free slot in scan order. The CPU and I/O
/// tiles go to the grid's reserved cells; accelerators share
/// [`ACCELERATOR_DOMAIN`] and take their bandwidth and output tag from the
/// catalog.
pub fn expand_enumerated<'a>(
    grid: Grid,
    tiles: impl IntoIterator<Item = &'a TileKind>,
    catalog: &TileCatalog,
    cpu_arch: &str,
) -> Result<Configuration, ExpandError> {
    let kinds: Vec<&TileKind> = tiles.into_iter().collect();
    let available = grid.free_slot_count();
    if kinds.len() > available {
        return Err(ExpandError::GridOverflow {
            declared: kinds.len(),
            available,
        });
    }
    if kinds.len() < available {
        return Err(ExpandError::UnfilledTiles {
            count: available - kinds.len(),
        });
    }

    let mut records = Vec::with_capacity(grid.cell_count());
    records.push(TileRecord::cpu(grid.cpu_cell()));
    records.push(TileRecord::io(grid.io_cell()));
    for (position, kind) in grid.free_cells().zip(kinds) {
        let record = match kind {
            TileKind::Empty => TileRecord::empty(position),
            TileKind::Memory => TileRecord::memory(position),
            TileKind::Accelerator { name, parallelism } => {
                let spec = catalog
                    .get(name)
                    .ok_or_else(|| ExpandError::UnknownAccelerator(name.clone()))?;
                TileRecord::accelerator(
                    position,
                    name,
                    &spec.esp_tag,
                    *parallelism,
                    ACCELERATOR_DOMAIN,
                    spec.bandwidth,
                )
            }
            TileKind::Cpu | TileKind::Io => {
                return Err(ExpandError::PlacementConflict { position });
            }
        };
        records.push(record);
    }

    let config = Configuration::assemble(grid, cpu_arch, records)?;
    tracing::debug!("expanded {}", config.name());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CPU_DOMAIN, DEFAULT_DOMAIN};
    use tessera_common::WarningSink;
    use tessera_config::parse_tile_catalog;

    fn catalog() -> TileCatalog {
        let sink = WarningSink::new();
        parse_tile_catalog(
            "ACC_LIST_START\n\
             AES aes_vivado 32 1.5 1 2 3 c\n\
             SHA sha_vivado 8 0.5 1 2 3 c\n\
             ACC_LIST_END\n",
            "tiles",
            &sink,
        )
        .unwrap()
    }

    fn expand(width: u32, height: u32, kinds: &[TileKind]) -> Result<Configuration, ExpandError> {
        expand_enumerated(Grid::new(width, height).unwrap(), kinds, &catalog(), "ariane")
    }

    #[test]
    fn reserved_cells_hold_cpu_and_io() {
        let config = expand(
            3,
            2,
            &[
                TileKind::Memory,
                TileKind::accelerator("AES", 2),
                TileKind::Empty,
                TileKind::accelerator("SHA", 1),
            ],
        )
        .unwrap();
        let cpu = config.tile_at(Position::new(0, 0)).unwrap();
        assert_eq!(cpu.kind, TileKind::Cpu);
        assert_eq!(cpu.clock_domain, CPU_DOMAIN);
        assert!(cpu.has_pll);
        let io = config.tile_at(Position::new(0, 1)).unwrap();
        assert_eq!(io.kind, TileKind::Io);
        assert_eq!(io.clock_domain, DEFAULT_DOMAIN);
        assert!(!io.has_pll);
        assert_eq!(config.name(), "config_MEM_AESx2_EMPTY_SHAx1");
    }

    #[test]
    fn accelerators_share_one_pll() {
        let config = expand(
            3,
            2,
            &[
                TileKind::accelerator("AES", 1),
                TileKind::Memory,
                TileKind::accelerator("SHA", 4),
                TileKind::accelerator("AES", 4),
            ],
        )
        .unwrap();
        let accs: Vec<&TileRecord> = config
            .tiles()
            .iter()
            .filter(|t| t.kind.accelerator_name().is_some())
            .collect();
        assert_eq!(accs.len(), 3);
        assert!(accs.iter().all(|t| t.clock_domain == ACCELERATOR_DOMAIN));
        assert_eq!(accs.iter().filter(|t| t.has_pll).count(), 1);
        assert!(accs[0].has_pll);
        assert_eq!(accs[0].position, Position::new(1, 0));
        assert_eq!(accs[0].bandwidth, 32);
        assert_eq!(accs[1].label, "sha_vivado");
        assert_eq!(accs[1].cores, 4);
    }

    #[test]
    fn memory_sizes_follow_tile_count() {
        let config = expand(
            3,
            2,
            &[
                TileKind::Memory,
                TileKind::Memory,
                TileKind::accelerator("AES", 1),
                TileKind::Empty,
            ],
        )
        .unwrap();
        assert_eq!(config.memory_tile_count(), 2);
        assert_eq!(config.memory_sizes(), MemorySizes::split(2).unwrap());
    }

    #[test]
    fn wrong_slot_count_errors() {
        let err = expand(3, 2, &[TileKind::Memory]).unwrap_err();
        assert!(matches!(err, ExpandError::UnfilledTiles { count: 3 }));
        let err = expand(2, 2, &[TileKind::Memory, TileKind::Empty, TileKind::Empty]).unwrap_err();
        assert!(matches!(
            err,
            ExpandError::GridOverflow {
                declared: 3,
                available: 2
            }
        ));
    }

    #[test]
    fn unknown_accelerator_errors() {
        let err = expand(2, 2, &[TileKind::Memory, TileKind::accelerator("FFT", 1)]).unwrap_err();
        assert!(matches!(err, ExpandError::UnknownAccelerator(ref n) if n == "FFT"));
    }

    #[test]
    fn no_memory_errors() {
        let err = expand(2, 2, &[TileKind::Empty, TileKind::accelerator("AES", 1)]).unwrap_err();
        assert!(matches!(err, ExpandError::NoMemoryTiles));
    }

    #[test]
    fn single_row_grid() {
        let config = expand(4, 1, &[TileKind::Memory, TileKind::accelerator("AES", 1)]).unwrap();
        assert_eq!(config.tile_at(Position::new(1, 0)).unwrap().kind, TileKind::Io);
        assert_eq!(config.name(), "config_MEM_AESx1");
    }

    #[test]
    fn assemble_rejects_duplicate_cells() {
        let grid = Grid::new(2, 1).unwrap();
        let err = Configuration::assemble(
            grid,
            "ariane",
            vec![
                TileRecord::cpu(Position::new(0, 0)),
                TileRecord::memory(Position::new(0, 0)),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, ExpandError::PlacementConflict { .. }));
    }

    #[test]
    fn assemble_requires_one_cpu_and_one_io() {
        let grid = Grid::new(2, 2).unwrap();
        let err = Configuration::assemble(
            grid,
            "ariane",
            vec![
                TileRecord::cpu(Position::new(0, 0)),
                TileRecord::memory(Position::new(1, 0)),
                TileRecord::empty(Position::new(0, 1)),
                TileRecord::empty(Position::new(1, 1)),
            ],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ExpandError::FixedTileCount {
                kind: TileKind::Io,
                count: 0
            }
        ));

        let err = Configuration::assemble(
            grid,
            "ariane",
            vec![
                TileRecord::cpu(Position::new(0, 0)),
                TileRecord::cpu(Position::new(1, 0)),
                TileRecord::io(Position::new(0, 1)),
                TileRecord::memory(Position::new(1, 1)),
            ],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ExpandError::FixedTileCount {
                kind: TileKind::Cpu,
                count: 2
            }
        ));
    }
}
