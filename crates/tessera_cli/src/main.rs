//! Tessera CLI: the command-line interface of the SoC configuration-space generator.
//!
//! Provides `tessera generate` to enumerate and write every feasible
//! configuration, `tessera list` to name them without expanding,
//! `tessera sample` to draw one random feasible configuration,
//! `tessera expand` to complete a minimal placement, and `tessera shuffle` /
//! `tessera pick` to post-process index files.

#![warn(missing_docs)]

mod expand;
mod generate;
mod list;
mod pipeline;
mod post;
mod sample;

use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tessera_config::FilterPolicy;
use tracing_subscriber::EnvFilter;

/// Tessera: tile-based SoC configuration space generator.
#[derive(Parser, Debug)]
#[command(name = "tessera", version, about = "Tile-based SoC configuration space generator")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a `tessera.toml` run configuration.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Enumerate feasible configurations and write them to partitioned directories.
    Generate(GenerateArgs),
    /// Write the names of all feasible configurations to one file.
    List(ListArgs),
    /// Draw one random feasible configuration by rejection sampling.
    Sample(SampleArgs),
    /// Complete a minimal placement file into a configuration.
    Expand(ExpandArgs),
    /// Shuffle the lines of a file in place.
    Shuffle(ShuffleArgs),
    /// Copy a number of random distinct lines from one file to another.
    Pick(PickArgs),
}

/// Input files shared by the space-exploring commands.
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Tile-info file (accelerator catalog and tile areas).
    #[arg(long)]
    pub tiles: Option<String>,

    /// Space-descriptor file.
    #[arg(long)]
    pub space: Option<String>,
}

/// Arguments for the `tessera generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Input files.
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Base path of the output partitions (`<out>_0`, `<out>_1`, ...).
    #[arg(short, long)]
    pub out: Option<String>,

    /// Number of output partitions.
    #[arg(short, long)]
    pub partitions: Option<usize>,

    /// Filtering policy (defaults to throughput-gated when thresholds are given).
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Stop after this many feasible configurations.
    #[arg(long, conflicts_with = "random_sample")]
    pub limit: Option<usize>,

    /// Keep a uniform random sample of this many feasible configurations.
    #[arg(long)]
    pub random_sample: Option<usize>,

    /// Shuffle each partition's index file after writing.
    #[arg(long)]
    pub shuffle: bool,

    /// Seed for random choices.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the `tessera list` subcommand.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Input files.
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Output file for the names.
    #[arg(short, long)]
    pub out: String,

    /// Filtering policy (defaults to throughput-gated when thresholds are given).
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Append the estimated area of each configuration.
    #[arg(long)]
    pub with_area: bool,
}

/// Arguments for the `tessera sample` subcommand.
#[derive(Parser, Debug)]
pub struct SampleArgs {
    /// Input files.
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Write the sample as a minimal placement file.
    #[arg(long)]
    pub mcf: Option<String>,

    /// Write the expanded sample and its index into this directory.
    #[arg(short, long)]
    pub out: Option<String>,

    /// Draws to attempt before giving up.
    #[arg(long)]
    pub max_attempts: Option<u64>,

    /// Seed for random choices.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the `tessera expand` subcommand.
#[derive(Parser, Debug)]
pub struct ExpandArgs {
    /// Tile-info file (accelerator catalog).
    #[arg(long)]
    pub tiles: Option<String>,

    /// Minimal placement file.
    #[arg(long)]
    pub placement: String,

    /// Output directory for the configuration and its index.
    #[arg(short, long)]
    pub out: String,
}

/// Arguments for the `tessera shuffle` subcommand.
#[derive(Parser, Debug)]
pub struct ShuffleArgs {
    /// File to shuffle in place.
    pub file: String,

    /// Seed for random choices.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the `tessera pick` subcommand.
#[derive(Parser, Debug)]
pub struct PickArgs {
    /// File to pick lines from.
    pub input: String,

    /// File to write the picked lines to.
    pub output: String,

    /// Number of lines to pick.
    pub count: usize,

    /// Seed for random choices.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Filtering policy selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Memory-count and coverage predicates over the full space.
    Standard,
    /// One configuration per accelerator and parallelism level.
    IsolationSweep,
    /// Standard predicates plus throughput thresholds.
    ThroughputGated,
}

impl From<PolicyArg> for FilterPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Standard => FilterPolicy::Standard,
            PolicyArg::IsolationSweep => FilterPolicy::IsolationSweep,
            PolicyArg::ThroughputGated => FilterPolicy::ThroughputGated,
        }
    }
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a `tessera.toml`.
    pub config: Option<String>,
}

impl GlobalArgs {
    /// Default log level for these flags; `RUST_LOG` takes precedence.
    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(global.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Generate(ref args) => generate::run(args, &global),
        Command::List(ref args) => list::run(args, &global),
        Command::Sample(ref args) => sample::run(args, &global),
        Command::Expand(ref args) => expand::run(args, &global),
        Command::Shuffle(ref args) => post::run_shuffle(args, &global),
        Command::Pick(ref args) => post::run_pick(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
