//! Minimal placement files and minimal-mode expansion.
//!
//! A minimal placement declares only the memory, empty and accelerator
//! tiles; the CPU and I/O tiles go to the first two cells left over.
//!
//! ```text
//! NOC 3 2 3 2
//! MEM 1 0 0 0
//! AES 2 0 2 4
//! SHA 1 1 2 1
//! EMPTY 2 1 0 0
//! ```
//!
//! The header is `NOC <x> <y> <clock domains> <accelerators>`; every other
//! line is `<KIND> <x> <y> <clock domain> <parallelism>`.

use std::collections::BTreeSet;
use std::path::Path;

use tessera_common::{memory_count_allowed, Grid, InputWarning, Position, TileKind, WarningSink};
use tessera_config::TileCatalog;

use crate::configuration::Configuration;
use crate::error::ExpandError;
use crate::record::{TileRecord, ACCELERATOR_DOMAIN, DEFAULT_DOMAIN};

const NOC_KEYWORD: &str = "NOC";
const MEM_KEYWORD: &str = "MEM";
const EMPTY_KEYWORD: &str = "EMPTY";

/// Clock domains declared by generated placements: default, CPU and accelerators.
pub const GENERATED_DOMAINS: u32 = 3;

/// One declared tile of a minimal placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementEntry {
    /// Memory, empty, or an accelerator with its parallelism.
    pub kind: TileKind,
    /// Declared cell.
    pub position: Position,
    /// Declared clock domain.
    pub clock_domain: u32,
}

/// A parsed minimal placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Grid declared by the header.
    pub grid: Grid,
    /// Number of clock domains declared by the header.
    pub domains: u32,
    /// Number of distinct accelerators declared by the header.
    pub accelerators: u32,
    /// Tile entries, in file order.
    pub entries: Vec<PlacementEntry>,
}

impl Placement {
    /// Builds a placement from the kinds of every free slot, in scan order.
    ///
    /// Accelerators are put in the shared accelerator domain; other tiles in
    /// the default domain. Fails if the slot count does not match the grid
    /// or a slot holds a CPU or I/O tile.
    pub fn from_assignment<'a>(
        grid: Grid,
        tiles: impl IntoIterator<Item = &'a TileKind>,
        accelerators: u32,
    ) -> Result<Self, ExpandError> {
        let kinds: Vec<&TileKind> = tiles.into_iter().collect();
        let available = grid.free_slot_count();
        if kinds.len() != available {
            return Err(if kinds.len() > available {
                ExpandError::GridOverflow {
                    declared: kinds.len(),
                    available,
                }
            } else {
                ExpandError::UnfilledTiles {
                    count: available - kinds.len(),
                }
            });
        }
        let mut entries = Vec::with_capacity(kinds.len());
        for (position, kind) in grid.free_cells().zip(kinds) {
            let clock_domain = match kind {
                TileKind::Accelerator { .. } => ACCELERATOR_DOMAIN,
                TileKind::Memory | TileKind::Empty => DEFAULT_DOMAIN,
                TileKind::Cpu | TileKind::Io => {
                    return Err(ExpandError::FixedTileDeclared {
                        position,
                        kind: kind.clone(),
                    })
                }
            };
            entries.push(PlacementEntry {
                kind: kind.clone(),
                position,
                clock_domain,
            });
        }
        Ok(Self {
            grid,
            domains: GENERATED_DOMAINS,
            accelerators,
            entries,
        })
    }

    /// Renders the placement in the minimal placement format.
    ///
    /// CPU and I/O entries have no representation and are rejected.
    pub fn render(&self) -> Result<String, ExpandError> {
        let mut out = format!(
            "{NOC_KEYWORD} {} {} {} {}\n",
            self.grid.width(),
            self.grid.height(),
            self.domains,
            self.accelerators
        );
        for entry in &self.entries {
            let (keyword, parallelism) = match &entry.kind {
                TileKind::Accelerator { name, parallelism } => (name.as_str(), *parallelism),
                TileKind::Memory => (MEM_KEYWORD, 0),
                TileKind::Empty => (EMPTY_KEYWORD, 0),
                TileKind::Cpu | TileKind::Io => {
                    return Err(ExpandError::FixedTileDeclared {
                        position: entry.position,
                        kind: entry.kind.clone(),
                    })
                }
            };
            out.push_str(&format!(
                "{keyword} {} {} {} {parallelism}\n",
                entry.position.x, entry.position.y, entry.clock_domain
            ));
        }
        Ok(out)
    }
}

/// Reads and parses a minimal placement file.
pub fn load_placement(path: &Path, sink: &WarningSink) -> Result<Placement, ExpandError> {
    let content = std::fs::read_to_string(path).map_err(|e| ExpandError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_placement(&content, &path.display().to_string(), sink)
}

/// Parses minimal placement text. `origin` names the input in warnings.
///
/// Lines without exactly five fields, or with non-numeric coordinates, are
/// skipped with a warning. The first valid line must be the `NOC` header.
pub fn parse_placement(
    content: &str,
    origin: &str,
    sink: &WarningSink,
) -> Result<Placement, ExpandError> {
    let mut header: Option<(u32, u32, u32, u32)> = None;
    let mut entries = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let skip = |reason: String| {
            sink.emit(InputWarning::MalformedInputLine {
                source: origin.to_string(),
                line: idx + 1,
                content: trimmed.to_string(),
                reason,
            })
        };

        let words: Vec<&str> = trimmed.split_whitespace().collect();
        if words.len() != 5 {
            skip(format!("expected 5 fields, found {}", words.len()));
            continue;
        }
        let mut numbers = [0u32; 4];
        let mut bad = None;
        for (slot, word) in numbers.iter_mut().zip(&words[1..]) {
            match word.parse() {
                Ok(n) => *slot = n,
                Err(e) => {
                    bad = Some(format!("invalid number `{word}`: {e}"));
                    break;
                }
            }
        }
        if let Some(reason) = bad {
            skip(reason);
            continue;
        }
        let [x, y, domain, parallelism] = numbers;

        if words[0] == NOC_KEYWORD {
            if header.is_some() {
                skip("duplicate NOC header".to_string());
            } else {
                header = Some((x, y, domain, parallelism));
            }
            continue;
        }
        if header.is_none() {
            return Err(ExpandError::MissingHeader {
                source_name: origin.to_string(),
            });
        }
        let kind = match words[0] {
            MEM_KEYWORD => TileKind::Memory,
            EMPTY_KEYWORD => TileKind::Empty,
            name => TileKind::accelerator(name, parallelism),
        };
        entries.push(PlacementEntry {
            kind,
            position: Position::new(x, y),
            clock_domain: domain,
        });
    }

    let (width, height, domains, accelerators) =
        header.ok_or_else(|| ExpandError::MissingHeader {
            source_name: origin.to_string(),
        })?;
    Ok(Placement {
        grid: Grid::new(width, height)?,
        domains,
        accelerators,
        entries,
    })
}

/// Expands a minimal placement into a configuration.
///
/// Declared entries must lie inside the grid and must not overlap. The first
/// unfilled cell in scan order becomes the CPU and the second the I/O tile;
/// any further unfilled cell is an error. A memory-tile count outside
/// {1, 2, 4} is accepted but reported to `sink`.
pub fn expand_placement(
    placement: &Placement,
    catalog: &TileCatalog,
    cpu_arch: &str,
    sink: &WarningSink,
) -> Result<Configuration, ExpandError> {
    let grid = placement.grid;
    let available = grid.free_slot_count();
    if placement.entries.len() > available {
        return Err(ExpandError::GridOverflow {
            declared: placement.entries.len(),
            available,
        });
    }

    let mut filled = BTreeSet::new();
    let mut records = Vec::with_capacity(grid.cell_count());
    for entry in &placement.entries {
        let position = entry.position;
        if !grid.contains(position) {
            return Err(ExpandError::OutOfBounds {
                position,
                width: grid.width(),
                height: grid.height(),
            });
        }
        if !filled.insert(position) {
            return Err(ExpandError::PlacementConflict { position });
        }
        tracing::debug!("filling position {position}");
        let record = match &entry.kind {
            TileKind::Memory => TileRecord::memory(position),
            TileKind::Accelerator { name, parallelism } => {
                let spec = catalog
                    .get(name)
                    .ok_or_else(|| ExpandError::UnknownAccelerator(name.clone()))?;
                if entry.clock_domain >= placement.domains {
                    return Err(ExpandError::ClockDomainOutOfRange {
                        position,
                        domain: entry.clock_domain,
                        domains: placement.domains,
                    });
                }
                TileRecord::accelerator(
                    position,
                    name,
                    &spec.esp_tag,
                    *parallelism,
                    entry.clock_domain,
                    spec.bandwidth,
                )
            }
            TileKind::Empty => TileRecord::empty(position),
            TileKind::Cpu | TileKind::Io => {
                return Err(ExpandError::FixedTileDeclared {
                    position,
                    kind: entry.kind.clone(),
                })
            }
        };
        records.push(record);
    }

    let unfilled: Vec<Position> = grid.cells().filter(|p| !filled.contains(p)).collect();
    match unfilled.as_slice() {
        [cpu, io] => {
            records.push(TileRecord::cpu(*cpu));
            records.push(TileRecord::io(*io));
        }
        more => {
            return Err(ExpandError::UnfilledTiles {
                count: more.len().saturating_sub(2),
            })
        }
    }

    let config = Configuration::assemble(grid, cpu_arch, records)?;
    let memory = config.memory_tile_count();
    if !memory_count_allowed(memory) {
        sink.emit(InputWarning::UnusualMemoryCount { count: memory });
    }
    tracing::info!("expanded placement into {}", config.name());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CPU_DOMAIN;
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

    const MCF: &str = "\
NOC 3 2 3 2
MEM 1 0 0 0
AES 2 0 2 4
SHA 1 1 2 1
EMPTY 2 1 0 0
";

    #[test]
    fn parse_header_and_entries() {
        let sink = WarningSink::new();
        let placement = parse_placement(MCF, "mcf", &sink).unwrap();
        assert!(sink.is_empty());
        assert_eq!(placement.grid.width(), 3);
        assert_eq!(placement.grid.height(), 2);
        assert_eq!(placement.domains, 3);
        assert_eq!(placement.accelerators, 2);
        assert_eq!(placement.entries.len(), 4);
        assert_eq!(placement.entries[1].kind, TileKind::accelerator("AES", 4));
        assert_eq!(placement.entries[1].clock_domain, 2);
    }

    #[test]
    fn malformed_lines_warn() {
        let sink = WarningSink::new();
        let text = format!("{MCF}garbage line\nMEM x 0 0 0\n");
        let placement = parse_placement(&text, "mcf", &sink).unwrap();
        assert_eq!(placement.entries.len(), 4);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn header_must_come_first() {
        let sink = WarningSink::new();
        let err = parse_placement("MEM 1 0 0 0\nNOC 3 2 3 1\n", "mcf", &sink).unwrap_err();
        assert!(matches!(err, ExpandError::MissingHeader { .. }));
        let err = parse_placement("", "mcf", &sink).unwrap_err();
        assert!(matches!(err, ExpandError::MissingHeader { .. }));
    }

    #[test]
    fn expand_fills_cpu_and_io() {
        let sink = WarningSink::new();
        let placement = parse_placement(MCF, "mcf", &sink).unwrap();
        let config = expand_placement(&placement, &catalog(), "ariane", &sink).unwrap();
        let cpu = config.tile_at(Position::new(0, 0)).unwrap();
        assert_eq!(cpu.kind, TileKind::Cpu);
        assert_eq!(cpu.clock_domain, CPU_DOMAIN);
        assert!(cpu.has_pll);
        assert_eq!(config.tile_at(Position::new(0, 1)).unwrap().kind, TileKind::Io);
        assert_eq!(config.name(), "config_MEM_AESx4_SHAx1_EMPTY");

        let aes = config.tile_at(Position::new(2, 0)).unwrap();
        let sha = config.tile_at(Position::new(1, 1)).unwrap();
        assert!(aes.has_pll);
        assert!(!sha.has_pll);
        assert_eq!(sha.bandwidth, 8);
    }

    #[test]
    fn cpu_takes_first_unfilled_cell() {
        let sink = WarningSink::new();
        let text = "NOC 2 2 3 1\nAES 0 0 2 1\nMEM 1 1 0 0\n";
        let placement = parse_placement(text, "mcf", &sink).unwrap();
        let config = expand_placement(&placement, &catalog(), "ariane", &sink).unwrap();
        assert_eq!(config.tile_at(Position::new(1, 0)).unwrap().kind, TileKind::Cpu);
        assert_eq!(config.tile_at(Position::new(0, 1)).unwrap().kind, TileKind::Io);
    }

    #[test]
    fn conflict_is_fatal() {
        let sink = WarningSink::new();
        let text = "NOC 3 2 3 1\nMEM 1 0 0 0\nAES 1 0 2 1\n";
        let placement = parse_placement(text, "mcf", &sink).unwrap();
        let err = expand_placement(&placement, &catalog(), "ariane", &sink).unwrap_err();
        assert!(matches!(
            err,
            ExpandError::PlacementConflict { position } if position == Position::new(1, 0)
        ));
    }

    #[test]
    fn leftover_cells_are_fatal() {
        let sink = WarningSink::new();
        let text = "NOC 3 2 3 1\nMEM 1 0 0 0\nAES 2 0 2 1\n";
        let placement = parse_placement(text, "mcf", &sink).unwrap();
        let err = expand_placement(&placement, &catalog(), "ariane", &sink).unwrap_err();
        assert!(matches!(err, ExpandError::UnfilledTiles { count: 2 }));
    }

    #[test]
    fn overflow_is_fatal() {
        let sink = WarningSink::new();
        let text = "NOC 2 1 3 1\nMEM 0 0 0 0\n";
        let placement = parse_placement(text, "mcf", &sink).unwrap();
        let err = expand_placement(&placement, &catalog(), "ariane", &sink).unwrap_err();
        assert!(matches!(
            err,
            ExpandError::GridOverflow {
                declared: 1,
                available: 0
            }
        ));
    }

    #[test]
    fn out_of_bounds_and_domain_checks() {
        let sink = WarningSink::new();
        let placement =
            parse_placement("NOC 2 2 3 1\nMEM 5 0 0 0\nAES 1 1 2 1\n", "mcf", &sink).unwrap();
        let err = expand_placement(&placement, &catalog(), "ariane", &sink).unwrap_err();
        assert!(matches!(err, ExpandError::OutOfBounds { .. }));

        let placement =
            parse_placement("NOC 2 2 3 1\nMEM 1 0 0 0\nAES 1 1 7 1\n", "mcf", &sink).unwrap();
        let err = expand_placement(&placement, &catalog(), "ariane", &sink).unwrap_err();
        assert!(matches!(
            err,
            ExpandError::ClockDomainOutOfRange { domain: 7, domains: 3, .. }
        ));
    }

    #[test]
    fn unknown_accelerator_is_fatal() {
        let sink = WarningSink::new();
        let placement =
            parse_placement("NOC 2 2 3 1\nMEM 1 0 0 0\nFFT 1 1 2 1\n", "mcf", &sink).unwrap();
        let err = expand_placement(&placement, &catalog(), "ariane", &sink).unwrap_err();
        assert!(matches!(err, ExpandError::UnknownAccelerator(ref n) if n == "FFT"));
    }

    #[test]
    fn render_generated_placement() {
        let grid = Grid::new(3, 2).unwrap();
        let tiles = [
            TileKind::Memory,
            TileKind::accelerator("AES", 2),
            TileKind::Empty,
            TileKind::accelerator("SHA", 1),
        ];
        let placement = Placement::from_assignment(grid, &tiles, 2).unwrap();
        assert_eq!(
            placement.render().unwrap(),
            "NOC 3 2 3 2\nMEM 1 0 0 0\nAES 2 0 2 2\nEMPTY 1 1 0 0\nSHA 2 1 2 1\n"
        );

        let sink = WarningSink::new();
        let reparsed = parse_placement(&placement.render().unwrap(), "mcf", &sink).unwrap();
        assert_eq!(reparsed, placement);
        let config = expand_placement(&reparsed, &catalog(), "ariane", &sink).unwrap();
        assert_eq!(config.name(), "config_MEM_AESx2_EMPTY_SHAx1");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("soc.mcf");
        std::fs::write(&path, MCF).unwrap();
        let sink = WarningSink::new();
        let placement = load_placement(&path, &sink).unwrap();
        assert_eq!(placement.entries.len(), 4);
        let err = load_placement(&dir.path().join("missing.mcf"), &sink).unwrap_err();
        assert!(matches!(err, ExpandError::Io { .. }));
    }

    #[test]
    fn fixed_tiles_cannot_be_declared() {
        let grid = Grid::new(2, 2).unwrap();
        let err = Placement::from_assignment(grid, &[TileKind::Memory, TileKind::Cpu], 0)
            .unwrap_err();
        assert!(matches!(
            err,
            ExpandError::FixedTileDeclared { kind: TileKind::Cpu, position } if position == Position::new(1, 1)
        ));

        let mut placement =
            Placement::from_assignment(grid, &[TileKind::Memory, TileKind::Empty], 0).unwrap();
        placement.entries[1].kind = TileKind::Io;
        assert!(matches!(
            placement.render(),
            Err(ExpandError::FixedTileDeclared { kind: TileKind::Io, .. })
        ));
        let sink = WarningSink::new();
        let err = expand_placement(&placement, &catalog(), "ariane", &sink).unwrap_err();
        assert!(matches!(
            err,
            ExpandError::FixedTileDeclared { kind: TileKind::Io, .. }
        ));
    }

    #[test]
    fn unusual_memory_count_is_reported() {
        let sink = WarningSink::new();
        let text = "NOC 3 2 3 1\nMEM 1 0 0 0\nMEM 2 0 0 0\nMEM 1 1 0 0\nAES 2 1 2 1\n";
        let placement = parse_placement(text, "mcf", &sink).unwrap();
        assert!(sink.is_empty());
        let config = expand_placement(&placement, &catalog(), "ariane", &sink).unwrap();
        assert_eq!(config.memory_tile_count(), 3);
        assert_eq!(
            sink.take_all(),
            [InputWarning::UnusualMemoryCount { count: 3 }]
        );

        let placement = parse_placement(MCF, "mcf", &sink).unwrap();
        expand_placement(&placement, &catalog(), "ariane", &sink).unwrap();
        assert!(sink.is_empty());
    }
}
