//! The tile catalog: every tile kind available for placement.
//!
//! The tile-info file holds two marked sections:
//!
//! ```text
//! ACC_LIST_START
//! <name> <esp-tag> <bandwidth> <throughput> <area x1> <area x2> <area x4> <behavior>
//! ACC_LIST_END
//! TILES_AREA_START
//! <tile-name> <area>
//! TILES_AREA_END
//! ```
//!
//! Lines inside a section that do not have the expected shape are skipped
//! with a warning. The accelerator section is required; the tile-area
//! section is optional.

use std::collections::BTreeMap;
use std::path::Path;

use tessera_common::{InputWarning, WarningSink};

use crate::error::ConfigError;

const ACC_START: &str = "ACC_LIST_START";
const ACC_END: &str = "ACC_LIST_END";
const AREA_START: &str = "TILES_AREA_START";
const AREA_END: &str = "TILES_AREA_END";

/// Parallelism levels that carry an area figure in the catalog, in column order.
pub const AREA_LEVELS: [u32; 3] = [1, 2, 4];

/// One accelerator entry of the tile catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct AcceleratorSpec {
    /// Catalog name, as used in space descriptors and placement files.
    pub name: String,
    /// Identifier written to configuration files for this accelerator.
    pub esp_tag: String,
    /// Interconnect bandwidth class.
    pub bandwidth: u32,
    /// Throughput of a single core.
    pub throughput: f64,
    /// Area cost at parallelism ×1, ×2 and ×4.
    pub area: [u64; 3],
    /// Free-form behavior tag.
    pub behavior: String,
}

impl AcceleratorSpec {
    /// Area at the given parallelism level, if the catalog records one.
    pub fn area_at(&self, parallelism: u32) -> Option<u64> {
        AREA_LEVELS
            .iter()
            .position(|&lvl| lvl == parallelism)
            .map(|i| self.area[i])
    }

    /// Aggregate throughput of one tile instantiated at `parallelism`.
    pub fn throughput_at(&self, parallelism: u32) -> f64 {
        f64::from(parallelism) * self.throughput
    }
}

/// The immutable catalog of accelerators and non-accelerator tile areas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TileCatalog {
    accelerators: BTreeMap<String, AcceleratorSpec>,
    tile_areas: BTreeMap<String, u64>,
}

impl TileCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an accelerator entry.
    pub fn insert(&mut self, spec: AcceleratorSpec) {
        self.accelerators.insert(spec.name.clone(), spec);
    }

    /// Records the area of a non-accelerator tile kind (`EMPTY`, `MEM`, ...).
    pub fn insert_tile_area(&mut self, tile: impl Into<String>, area: u64) {
        self.tile_areas.insert(tile.into(), area);
    }

    /// Looks up an accelerator by catalog name.
    pub fn get(&self, name: &str) -> Option<&AcceleratorSpec> {
        self.accelerators.get(name)
    }

    /// Looks up an accelerator by its output identifier.
    pub fn by_esp_tag(&self, tag: &str) -> Option<&AcceleratorSpec> {
        self.accelerators.values().find(|spec| spec.esp_tag == tag)
    }

    /// Area of a non-accelerator tile kind.
    pub fn tile_area(&self, tile: &str) -> Option<u64> {
        self.tile_areas.get(tile).copied()
    }

    /// Returns `true` if the catalog has an entry for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.accelerators.contains_key(name)
    }

    /// Number of accelerator entries.
    pub fn len(&self) -> usize {
        self.accelerators.len()
    }

    /// Returns `true` if the catalog has no accelerators.
    pub fn is_empty(&self) -> bool {
        self.accelerators.is_empty()
    }

    /// Iterates over accelerator entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = &AcceleratorSpec> {
        self.accelerators.values()
    }
}

/// Reads and parses a tile-info file.
pub fn load_tile_catalog(path: &Path, sink: &WarningSink) -> Result<TileCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    parse_tile_catalog(&content, &path.display().to_string(), sink)
}

/// Parses tile-info text. `origin` names the input in warnings.
pub fn parse_tile_catalog(
    content: &str,
    origin: &str,
    sink: &WarningSink,
) -> Result<TileCatalog, ConfigError> {
    let mut catalog = TileCatalog::new();

    let acc_lines = section(content, ACC_START, ACC_END).ok_or(ConfigError::MissingSection {
        start: ACC_START,
        end: ACC_END,
    })?;
    for (line_no, line) in acc_lines {
        match parse_accelerator_line(line) {
            Ok(spec) => catalog.insert(spec),
            Err(reason) => sink.emit(malformed(origin, line_no, line, reason)),
        }
    }

    if let Some(area_lines) = section(content, AREA_START, AREA_END) {
        for (line_no, line) in area_lines {
            let words: Vec<&str> = line.split_whitespace().collect();
            if words.len() != 2 {
                sink.emit(malformed(
                    origin,
                    line_no,
                    line,
                    format!("expected 2 fields, found {}", words.len()),
                ));
                continue;
            }
            match words[1].parse::<u64>() {
                Ok(area) => catalog.insert_tile_area(words[0], area),
                Err(e) => sink.emit(malformed(
                    origin,
                    line_no,
                    line,
                    format!("invalid area `{}`: {e}", words[1]),
                )),
            }
        }
    }

    tracing::debug!(
        accelerators = catalog.len(),
        tile_areas = catalog.tile_areas.len(),
        "loaded tile catalog from {origin}"
    );
    Ok(catalog)
}

fn parse_accelerator_line(line: &str) -> Result<AcceleratorSpec, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() != 8 {
        return Err(format!("expected 8 fields, found {}", words.len()));
    }
    let bandwidth = words[2]
        .parse::<u32>()
        .map_err(|e| format!("invalid bandwidth `{}`: {e}", words[2]))?;
    let throughput = words[3]
        .parse::<f64>()
        .map_err(|e| format!("invalid throughput `{}`: {e}", words[3]))?;
    let mut area = [0u64; 3];
    for (slot, word) in area.iter_mut().zip(&words[4..7]) {
        *slot = word
            .parse::<u64>()
            .map_err(|e| format!("invalid area `{word}`: {e}"))?;
    }
    Ok(AcceleratorSpec {
        name: words[0].to_string(),
        esp_tag: words[1].to_string(),
        bandwidth,
        throughput,
        area,
        behavior: words[7].to_string(),
    })
}

/// Returns the non-blank lines strictly between the first `start` marker and
/// the following `end` marker, with their 1-based line numbers.
fn section<'a>(content: &'a str, start: &str, end: &str) -> Option<Vec<(usize, &'a str)>> {
    let mut lines = content.lines().enumerate();
    lines.by_ref().find(|(_, line)| line.contains(start))?;
    let mut body = Vec::new();
    for (idx, line) in lines {
        if line.contains(end) {
            return Some(body);
        }
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        body.push((idx + 1, trimmed));
    }
    None
}

fn malformed(origin: &str, line: usize, content: &str, reason: String) -> InputWarning {
    InputWarning::MalformedInputLine {
        source: origin.to_string(),
        line,
        content: content.to_string(),
        reason,
    }
}
