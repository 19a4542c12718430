//! Run configuration types deserialized from `tessera.toml`.

use serde::Deserialize;

/// The top-level run configuration parsed from `tessera.toml`.
///
/// Every section is optional; command-line flags override whatever is set here.
#[derive(Debug, Default, Deserialize)]
pub struct RunConfig {
    /// Paths of the domain input files.
    #[serde(default)]
    pub inputs: InputsConfig,
    /// Where and how configurations are written.
    #[serde(default)]
    pub output: OutputConfig,
    /// Enumeration settings.
    #[serde(default)]
    pub generate: GenerateConfig,
    /// Rejection-sampling settings.
    #[serde(default)]
    pub sample: SampleConfig,
    /// Fixed SoC parameters written into every configuration.
    #[serde(default)]
    pub soc: SocConfig,
}

/// Paths of the line-oriented domain inputs.
#[derive(Debug, Default, Deserialize)]
pub struct InputsConfig {
    /// Tile-info file (accelerator catalog and tile areas).
    pub tiles: Option<String>,
    /// Space-descriptor file.
    pub space: Option<String>,
}

/// Output partitioning.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Base path of the output partitions; partition `i` is `<dir>_<i>`.
    pub dir: Option<String>,
    /// Number of output partitions.
    #[serde(default = "default_partitions")]
    pub partitions: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            partitions: default_partitions(),
        }
    }
}

fn default_partitions() -> usize {
    1
}

/// Enumeration settings for `tessera generate`.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateConfig {
    /// Which candidate stream and predicates to use. Chosen from the
    /// descriptor when absent.
    pub policy: Option<FilterPolicy>,
    /// Stop after this many accepted configurations.
    pub limit: Option<usize>,
    /// Keep a uniform random subset of this many accepted configurations.
    pub random_sample: Option<usize>,
    /// Shuffle each partition's index file after the run.
    #[serde(default)]
    pub shuffle: bool,
    /// Seed for every random choice of the run.
    pub seed: Option<u64>,
}

/// Settings for the rejection-sampling generator.
#[derive(Debug, Deserialize)]
pub struct SampleConfig {
    /// Draws attempted before the space is declared infeasible.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_max_attempts() -> u64 {
    1_000_000
}

/// Fixed SoC-level parameters.
#[derive(Debug, Deserialize)]
pub struct SocConfig {
    /// Processor architecture written as `CPU_ARCH`.
    #[serde(default = "default_cpu_arch")]
    pub cpu_arch: String,
}

impl Default for SocConfig {
    fn default() -> Self {
        Self {
            cpu_arch: default_cpu_arch(),
        }
    }
}

fn default_cpu_arch() -> String {
    "ariane".to_string()
}

/// The filtering strategy of a run, selected once at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterPolicy {
    /// Full multiset space; memory-count and coverage predicates.
    Standard,
    /// One configuration per accelerator and parallelism level, alone with one memory tile.
    IsolationSweep,
    /// Full multiset space; standard predicates plus per-accelerator throughput thresholds.
    ThroughputGated,
}

impl std::fmt::Display for FilterPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterPolicy::Standard => write!(f, "standard"),
            FilterPolicy::IsolationSweep => write!(f, "isolation-sweep"),
            FilterPolicy::ThroughputGated => write!(f, "throughput-gated"),
        }
    }
}
