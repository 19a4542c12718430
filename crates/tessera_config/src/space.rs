//! The space descriptor: the parameters of one exploration.
//!
//! The descriptor file is line-oriented; the first whitespace-separated token
//! of each line is the key:
//!
//! ```text
//! NOC_SIZE_X 3
//! NOC_SIZE_Y 2
//! PAR_LVLS 1 2 4
//! ACC_LIST AES SHA
//! THR_LIST 2.0 0.5
//! N_MEM 2
//! ```
//!
//! `THR_LIST` and `N_MEM` are optional. When a key appears more than once,
//! the last occurrence wins.

use std::path::Path;

use tessera_common::{Grid, InputWarning, WarningSink};

use crate::catalog::TileCatalog;
use crate::error::ConfigError;

/// Validated parameters of a configuration-space exploration.
#[derive(Clone, Debug, PartialEq)]
pub struct SpaceDescriptor {
    grid: Grid,
    parallelism_levels: Vec<u32>,
    required_accelerators: Vec<String>,
    thresholds: Option<Vec<f64>>,
    pinned_memory: Option<u32>,
}

impl SpaceDescriptor {
    /// Creates a descriptor without thresholds or pinned memory.
    ///
    /// Parallelism levels must be non-empty, positive, and distinct; accelerator
    /// names must be distinct.
    pub fn new(
        grid: Grid,
        parallelism_levels: Vec<u32>,
        required_accelerators: Vec<String>,
    ) -> Result<Self, ConfigError> {
        if parallelism_levels.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one parallelism level is required".to_string(),
            ));
        }
        if let Some(&lvl) = parallelism_levels.iter().find(|&&l| l == 0) {
            return Err(ConfigError::ValidationError(format!(
                "parallelism level {lvl} is not positive"
            )));
        }
        if let Some(dup) = first_duplicate(&parallelism_levels) {
            return Err(ConfigError::ValidationError(format!(
                "parallelism level {dup} listed twice"
            )));
        }
        if let Some(dup) = first_duplicate(&required_accelerators) {
            return Err(ConfigError::ValidationError(format!(
                "accelerator '{dup}' listed twice"
            )));
        }
        Ok(Self {
            grid,
            parallelism_levels,
            required_accelerators,
            thresholds: None,
            pinned_memory: None,
        })
    }

    /// Attaches per-accelerator throughput thresholds, in `required_accelerators` order.
    pub fn with_thresholds(mut self, thresholds: Vec<f64>) -> Result<Self, ConfigError> {
        if thresholds.len() != self.required_accelerators.len() {
            return Err(ConfigError::ValidationError(format!(
                "{} thresholds given for {} accelerators",
                thresholds.len(),
                self.required_accelerators.len()
            )));
        }
        self.thresholds = Some(thresholds);
        Ok(self)
    }

    /// Pins the number of memory tiles, removing memory from enumeration.
    pub fn with_pinned_memory(mut self, count: u32) -> Result<Self, ConfigError> {
        if count as usize > self.grid.free_slot_count() {
            return Err(ConfigError::ValidationError(format!(
                "{count} memory tiles do not fit in {} free slots",
                self.grid.free_slot_count()
            )));
        }
        self.pinned_memory = Some(count);
        Ok(self)
    }

    /// The tile grid.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Allowed parallelism levels, in declaration order.
    pub fn parallelism_levels(&self) -> &[u32] {
        &self.parallelism_levels
    }

    /// Accelerators that must appear at least once, in declaration order.
    pub fn required_accelerators(&self) -> &[String] {
        &self.required_accelerators
    }

    /// Throughput thresholds aligned with [`required_accelerators`](Self::required_accelerators).
    pub fn thresholds(&self) -> Option<&[f64]> {
        self.thresholds.as_deref()
    }

    /// Threshold for the named accelerator, if thresholds are configured.
    pub fn threshold_for(&self, accelerator: &str) -> Option<f64> {
        let idx = self
            .required_accelerators
            .iter()
            .position(|a| a == accelerator)?;
        self.thresholds.as_ref().map(|t| t[idx])
    }

    /// Number of memory tiles fixed outside enumeration, if any.
    pub fn pinned_memory(&self) -> Option<u32> {
        self.pinned_memory
    }

    /// Number of slots the enumerator fills: free cells minus pinned memory.
    pub fn enumerated_slot_count(&self) -> usize {
        self.grid.free_slot_count() - self.pinned_memory.unwrap_or(0) as usize
    }

    /// Checks that every required accelerator exists in `catalog`.
    pub fn check_against(&self, catalog: &TileCatalog) -> Result<(), ConfigError> {
        match self
            .required_accelerators
            .iter()
            .find(|name| !catalog.contains(name))
        {
            Some(missing) => Err(ConfigError::UnknownAccelerator(missing.clone())),
            None => Ok(()),
        }
    }
}

fn first_duplicate<T: PartialEq + Clone>(items: &[T]) -> Option<T> {
    items
        .iter()
        .enumerate()
        .find(|(i, item)| items[..*i].contains(item))
        .map(|(_, item)| item.clone())
}

/// Reads and parses a space-descriptor file.
pub fn load_space_descriptor(
    path: &Path,
    sink: &WarningSink,
) -> Result<SpaceDescriptor, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    parse_space_descriptor(&content, &path.display().to_string(), sink)
}

#[derive(Default)]
struct RawDescriptor {
    size_x: Option<u32>,
    size_y: Option<u32>,
    levels: Option<Vec<u32>>,
    accelerators: Option<Vec<String>>,
    thresholds: Option<Vec<f64>>,
    n_mem: Option<u32>,
}

/// Parses space-descriptor text. `origin` names the input in warnings.
pub fn parse_space_descriptor(
    content: &str,
    origin: &str,
    sink: &WarningSink,
) -> Result<SpaceDescriptor, ConfigError> {
    let mut raw = RawDescriptor::default();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut words = trimmed.split_whitespace();
        let Some(key) = words.next() else { continue };
        let values: Vec<&str> = words.collect();

        let outcome = match key {
            "NOC_SIZE_X" => single(&values).map(|v| raw.size_x = Some(v)),
            "NOC_SIZE_Y" => single(&values).map(|v| raw.size_y = Some(v)),
            "N_MEM" => single(&values).map(|v| raw.n_mem = Some(v)),
            "PAR_LVLS" => list::<u32>(&values).map(|v| raw.levels = Some(v)),
            "THR_LIST" => list::<f64>(&values).map(|v| raw.thresholds = Some(v)),
            "ACC_LIST" => {
                raw.accelerators = Some(values.iter().map(|s| s.to_string()).collect());
                Ok(())
            }
            other => {
                sink.emit(InputWarning::UnknownKey {
                    source: origin.to_string(),
                    line: line_no,
                    key: other.to_string(),
                });
                Ok(())
            }
        };

        if let Err(reason) = outcome {
            sink.emit(InputWarning::MalformedInputLine {
                source: origin.to_string(),
                line: line_no,
                content: trimmed.to_string(),
                reason,
            });
        }
    }

    let size_x = raw
        .size_x
        .ok_or_else(|| ConfigError::MissingField("NOC_SIZE_X".to_string()))?;
    let size_y = raw
        .size_y
        .ok_or_else(|| ConfigError::MissingField("NOC_SIZE_Y".to_string()))?;
    let levels = raw
        .levels
        .ok_or_else(|| ConfigError::MissingField("PAR_LVLS".to_string()))?;
    let accelerators = raw
        .accelerators
        .ok_or_else(|| ConfigError::MissingField("ACC_LIST".to_string()))?;

    let mut descriptor = SpaceDescriptor::new(Grid::new(size_x, size_y)?, levels, accelerators)?;
    if let Some(thresholds) = raw.thresholds {
        descriptor = descriptor.with_thresholds(thresholds)?;
    }
    if let Some(n_mem) = raw.n_mem {
        descriptor = descriptor.with_pinned_memory(n_mem)?;
    }
    Ok(descriptor)
}

fn single(values: &[&str]) -> Result<u32, String> {
    match values {
        [v] => v.parse().map_err(|e| format!("invalid value `{v}`: {e}")),
        _ => Err(format!("expected 1 value, found {}", values.len())),
    }
}

fn list<T: std::str::FromStr>(values: &[&str]) -> Result<Vec<T>, String>
where
    T::Err: std::fmt::Display,
{
    values
        .iter()
        .map(|v| v.parse::<T>().map_err(|e| format!("invalid value `{v}`: {e}")))
        .collect()
}
