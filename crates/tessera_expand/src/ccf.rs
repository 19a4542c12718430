//! The `.ccf` complete-configuration format.
//!
//! A `.ccf` file is a list of `KEY = VALUE` lines:
//!
//! ```text
//! CPU_ARCH = ariane
//! NCPU_TILE = 1
//! CONFIG_NOC_ROWS = 2
//! CONFIG_NOC_COLS = 3
//! CONFIG_NOC_PLANES = 1
//! TILE_0_0 = cpu
//! CLOCK_0_0 = 1
//! PLL_0_0 = 1
//! BW_0_0 = 0
//! TILE_0_1 = aes_vivado
//! CLOCK_0_1 = 2
//! PLL_0_1 = 1
//! BW_0_1 = 32
//! NCORES_0_1 = 2
//! ...
//! CONFIG_MEM_SIZE_MAIN = 2048
//! CONFIG_MEM_SIZE_SECONDARY = 1024
//! ```
//!
//! Per-tile keys are suffixed `_<y>_<x>` (row first) and appear in scan
//! order. `NCORES` is written for accelerator tiles only.

use std::fmt;
use std::str::FromStr;

use tessera_common::{Grid, Position, TileKind};
use tessera_config::TileCatalog;

use crate::configuration::Configuration;
use crate::error::CcfError;
use crate::memory::MemorySizes;
use crate::record::TileRecord;

/// One `KEY = VALUE` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CcfEntry {
    /// The key.
    pub key: String,
    /// The value, without surrounding whitespace.
    pub value: String,
}

/// An ordered list of `.ccf` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CcfDocument {
    entries: Vec<CcfEntry>,
}

impl CcfDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        self.entries.push(CcfEntry {
            key: key.into(),
            value: value.to_string(),
        });
    }

    /// The value of the last entry with `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the document has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries, in file order.
    pub fn entries(&self) -> &[CcfEntry] {
        &self.entries
    }

    /// Splits text into entries. Blank lines and `#` comments are skipped.
    pub fn parse(text: &str) -> Result<Self, CcfError> {
        let mut doc = Self::new();
        for (idx, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let (key, value) = trimmed.split_once('=').ok_or_else(|| CcfError::MalformedLine {
                line: idx + 1,
                content: trimmed.to_string(),
            })?;
            doc.push(key.trim(), value.trim());
        }
        Ok(doc)
    }

    /// Renders the document, one entry per line.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn require(&self, key: &str) -> Result<&str, CcfError> {
        self.get(key)
            .ok_or_else(|| CcfError::MissingKey(key.to_string()))
    }

    fn number<T: FromStr>(&self, key: &str) -> Result<T, CcfError> {
        let raw = self.require(key)?;
        raw.parse().map_err(|_| CcfError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        })
    }
}

impl fmt::Display for CcfDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{} = {}", entry.key, entry.value)?;
        }
        Ok(())
    }
}

fn tile_key(prefix: &str, position: Position) -> String {
    format!("{prefix}_{}_{}", position.y, position.x)
}

impl Configuration {
    /// Lays the configuration out as `.ccf` entries.
    pub fn to_ccf_document(&self) -> CcfDocument {
        let grid = self.grid();
        let mut doc = CcfDocument::new();
        doc.push("CPU_ARCH", self.cpu_arch());
        doc.push("NCPU_TILE", 1);
        doc.push("CONFIG_NOC_ROWS", grid.height());
        doc.push("CONFIG_NOC_COLS", grid.width());
        doc.push("CONFIG_NOC_PLANES", 1);
        for tile in self.tiles() {
            doc.push(tile_key("TILE", tile.position), &tile.label);
            doc.push(tile_key("CLOCK", tile.position), tile.clock_domain);
            doc.push(tile_key("PLL", tile.position), u8::from(tile.has_pll));
            doc.push(tile_key("BW", tile.position), tile.bandwidth);
            if tile.cores != 0 {
                doc.push(tile_key("NCORES", tile.position), tile.cores);
            }
        }
        let memory = self.memory_sizes();
        doc.push("CONFIG_MEM_SIZE_MAIN", memory.main);
        doc.push("CONFIG_MEM_SIZE_SECONDARY", memory.secondary);
        doc
    }

    /// Serializes the configuration as `.ccf` text.
    pub fn to_ccf(&self) -> String {
        self.to_ccf_document().render()
    }
}

/// Rebuilds a configuration from `.ccf` text.
///
/// Accelerator labels are resolved through the catalog's output tags. PLL
/// flags and memory sizes are taken as written, so re-serializing the
/// result reproduces the input.
pub fn parse_ccf(text: &str, catalog: &TileCatalog) -> Result<Configuration, CcfError> {
    let doc = CcfDocument::parse(text)?;
    let cpu_arch = doc.require("CPU_ARCH")?.to_string();
    let rows: u32 = doc.number("CONFIG_NOC_ROWS")?;
    let cols: u32 = doc.number("CONFIG_NOC_COLS")?;
    let grid = Grid::new(cols, rows)?;

    let mut tiles = Vec::with_capacity(grid.cell_count());
    for position in grid.cells() {
        let label = doc.require(&tile_key("TILE", position))?;
        let clock_domain: u32 = doc.number(&tile_key("CLOCK", position))?;
        let pll: u8 = doc.number(&tile_key("PLL", position))?;
        let bandwidth: u32 = doc.number(&tile_key("BW", position))?;
        let ncores_key = tile_key("NCORES", position);
        let cores: u32 = match doc.get(&ncores_key) {
            Some(_) => doc.number(&ncores_key)?,
            None => 0,
        };
        let kind = match label {
            "cpu" => TileKind::Cpu,
            "IO" => TileKind::Io,
            "mem" => TileKind::Memory,
            "empty" => TileKind::Empty,
            tag => match catalog.by_esp_tag(tag) {
                Some(spec) => TileKind::accelerator(spec.name.clone(), cores),
                None => {
                    return Err(CcfError::UnknownTile {
                        position,
                        label: tag.to_string(),
                    })
                }
            },
        };
        tiles.push(TileRecord {
            position,
            kind,
            label: label.to_string(),
            clock_domain,
            has_pll: pll != 0,
            bandwidth,
            cores,
        });
    }

    let memory = MemorySizes {
        main: doc.number("CONFIG_MEM_SIZE_MAIN")?,
        secondary: doc.number("CONFIG_MEM_SIZE_SECONDARY")?,
    };
    Ok(Configuration::from_parts(grid, cpu_arch, tiles, memory))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::expand_enumerated;
    use tessera_common::WarningSink;
    use tessera_config::parse_tile_catalog;

    fn catalog() -> TileCatalog {
        let sink = WarningSink::new();
        parse_tile_catalog(
            "ACC_LIST_START\nAES aes_vivado 32 1.5 1 2 3 c\nACC_LIST_END\n",
            "tiles",
            &sink,
        )
        .unwrap()
    }

    fn sample() -> Configuration {
        expand_enumerated(
            Grid::new(2, 2).unwrap(),
            &[TileKind::accelerator("AES", 2), TileKind::Memory],
            &catalog(),
            "ariane",
        )
        .unwrap()
    }

    const EXPECTED: &str = "\
CPU_ARCH = ariane
NCPU_TILE = 1
CONFIG_NOC_ROWS = 2
CONFIG_NOC_COLS = 2
CONFIG_NOC_PLANES = 1
TILE_0_0 = cpu
CLOCK_0_0 = 1
PLL_0_0 = 1
BW_0_0 = 0
TILE_0_1 = aes_vivado
CLOCK_0_1 = 2
PLL_0_1 = 1
BW_0_1 = 32
NCORES_0_1 = 2
TILE_1_0 = IO
CLOCK_1_0 = 0
PLL_1_0 = 0
BW_1_0 = 0
TILE_1_1 = mem
CLOCK_1_1 = 0
PLL_1_1 = 0
BW_1_1 = 0
CONFIG_MEM_SIZE_MAIN = 2048
CONFIG_MEM_SIZE_SECONDARY = 1024
";

    #[test]
    fn serialize_layout() {
        assert_eq!(sample().to_ccf(), EXPECTED);
    }

    #[test]
    fn parse_rebuilds_configuration() {
        let original = sample();
        let parsed = parse_ccf(EXPECTED, &catalog()).unwrap();
        assert_eq!(parsed, original);
        assert_eq!(parsed.name(), "config_AESx2_MEM");
    }

    #[test]
    fn reserialization_is_byte_identical() {
        let parsed = parse_ccf(EXPECTED, &catalog()).unwrap();
        assert_eq!(parsed.to_ccf(), EXPECTED);
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let text = format!("# generated\n\n{EXPECTED}");
        assert!(parse_ccf(&text, &catalog()).is_ok());
    }

    #[test]
    fn missing_key_errors() {
        let text = EXPECTED.replace("BW_1_1 = 0\n", "");
        let err = parse_ccf(&text, &catalog()).unwrap_err();
        assert!(matches!(err, CcfError::MissingKey(ref k) if k == "BW_1_1"));
    }

    #[test]
    fn malformed_line_errors() {
        let text = EXPECTED.replace("NCPU_TILE = 1", "NCPU_TILE 1");
        let err = parse_ccf(&text, &catalog()).unwrap_err();
        assert!(matches!(err, CcfError::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn invalid_number_errors() {
        let text = EXPECTED.replace("CLOCK_1_0 = 0", "CLOCK_1_0 = zero");
        let err = parse_ccf(&text, &catalog()).unwrap_err();
        assert!(matches!(err, CcfError::InvalidValue { ref key, .. } if key == "CLOCK_1_0"));
    }

    #[test]
    fn unknown_label_errors() {
        let text = EXPECTED.replace("aes_vivado", "fft_rtl");
        let err = parse_ccf(&text, &catalog()).unwrap_err();
        assert!(matches!(err, CcfError::UnknownTile { ref label, .. } if label == "fft_rtl"));
    }

    #[test]
    fn document_lookup_prefers_last_entry() {
        let doc = CcfDocument::parse("A = 1\nB = 2\nA = 3\n").unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.get("A"), Some("3"));
        assert_eq!(doc.get("C"), None);
    }
}
