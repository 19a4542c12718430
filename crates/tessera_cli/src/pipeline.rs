//! Shared pipeline helpers used by the CLI commands.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tessera_common::WarningSink;
use tessera_config::{
    load_run_config, load_space_descriptor, load_tile_catalog, RunConfig, SpaceDescriptor,
    TileCatalog,
};

use crate::{GlobalArgs, InputArgs};

/// Run configuration picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "tessera.toml";

/// Loads the run configuration named by `--config`, falling back to
/// `./tessera.toml` and then to built-in defaults.
pub fn load_config(global: &GlobalArgs) -> Result<RunConfig, Box<dyn std::error::Error>> {
    if let Some(path) = &global.config {
        return Ok(load_run_config(Path::new(path))?);
    }
    let local = Path::new(DEFAULT_CONFIG_FILE);
    if local.is_file() {
        tracing::debug!("using {}", local.display());
        return Ok(load_run_config(local)?);
    }
    Ok(RunConfig::default())
}

/// Picks the command-line value if given, else the configured one.
pub fn resolve_path(
    flag: Option<&str>,
    configured: Option<&str>,
    what: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    flag.or(configured)
        .map(PathBuf::from)
        .ok_or_else(|| format!("no {what} given (pass --{what} or set it in {DEFAULT_CONFIG_FILE})").into())
}

/// Loads the tile catalog and the space descriptor and checks them against each other.
///
/// Skipped input lines are reported on stderr unless `quiet` is set.
pub fn load_inputs(
    inputs: &InputArgs,
    config: &RunConfig,
    global: &GlobalArgs,
) -> Result<(TileCatalog, SpaceDescriptor), Box<dyn std::error::Error>> {
    let tiles = resolve_path(
        inputs.tiles.as_deref(),
        config.inputs.tiles.as_deref(),
        "tiles",
    )?;
    let space = resolve_path(
        inputs.space.as_deref(),
        config.inputs.space.as_deref(),
        "space",
    )?;

    let sink = WarningSink::new();
    let catalog = load_tile_catalog(&tiles, &sink)?;
    let descriptor = load_space_descriptor(&space, &sink)?;
    report_warnings(&sink, global);

    if global.verbose {
        eprintln!(
            "  Loaded {} accelerators, grid {}x{}",
            catalog.len(),
            descriptor.grid().width(),
            descriptor.grid().height()
        );
    }
    Ok((catalog, descriptor))
}

/// Prints how many input warnings were raised.
pub fn report_warnings(sink: &WarningSink, global: &GlobalArgs) {
    if !global.quiet && !sink.is_empty() {
        eprintln!("  {} input warning(s)", sink.len());
    }
}

/// Seeded generator when a seed is known, entropy-seeded otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Formats the size of the enumerated space, which may exceed `u128`.
pub fn format_space_size(size: Option<u128>) -> String {
    match size {
        Some(n) => n.to_string(),
        None => "more than 2^128".to_string(),
    }
}

/// Prints the two counts every enumerating command reports.
pub fn print_counts(possible: Option<u128>, feasible: u64) {
    println!(
        "Number of possible configurations: {}",
        format_space_size(possible)
    );
    println!("Number of feasible configurations: {feasible}");
}
