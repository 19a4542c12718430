//! The `tessera expand` command: complete a minimal placement file.

use std::path::Path;

use tessera_common::WarningSink;
use tessera_config::load_tile_catalog;
use tessera_emit::write_single;
use tessera_expand::{expand_placement, load_placement};

use crate::pipeline::{load_config, report_warnings, resolve_path};
use crate::{ExpandArgs, GlobalArgs};

/// Runs the expand command.
pub fn run(args: &ExpandArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config(global)?;
    let tiles = resolve_path(args.tiles.as_deref(), config.inputs.tiles.as_deref(), "tiles")?;

    let sink = WarningSink::new();
    let catalog = load_tile_catalog(&tiles, &sink)?;
    let placement = load_placement(Path::new(&args.placement), &sink)?;
    let expanded = expand_placement(&placement, &catalog, &config.soc.cpu_arch, &sink)?;
    report_warnings(&sink, global);

    let path = write_single(Path::new(&args.out), &expanded)?;
    if !global.quiet {
        eprintln!("  Wrote {}", path.display());
    }
    Ok(0)
}
