//! The `tessera list` command: name every feasible configuration without expanding it.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tessera_config::FilterPolicy;
use tessera_space::{default_policy, Explorer};

use crate::pipeline::{load_config, load_inputs, print_counts};
use crate::{GlobalArgs, ListArgs};

/// Runs the list command.
///
/// Writes one configuration name per line, optionally followed by the
/// estimated area (`-` when the catalog lacks a figure for some tile).
pub fn run(args: &ListArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config(global)?;
    let (catalog, space) = load_inputs(&args.inputs, &config, global)?;
    let policy = args
        .policy
        .map(FilterPolicy::from)
        .or(config.generate.policy)
        .unwrap_or_else(|| default_policy(&space));
    let explorer = Explorer::new(&space, &catalog, policy)?;

    let path = Path::new(&args.out);
    let file = File::create(path).map_err(|e| format!("cannot create {}: {e}", path.display()))?;
    let mut out = BufWriter::new(file);
    let mut feasible: u64 = 0;
    for candidate in explorer.feasible() {
        let name = candidate.name(explorer.alphabet());
        if args.with_area {
            match explorer.estimated_area(&candidate) {
                Some(area) => writeln!(out, "{name} {area}")?,
                None => writeln!(out, "{name} -")?,
            }
        } else {
            writeln!(out, "{name}")?;
        }
        feasible += 1;
    }
    out.flush()?;

    if !global.quiet {
        eprintln!("  Listed {feasible} configuration(s) in {}", path.display());
    }
    print_counts(explorer.space_size(), feasible);
    Ok(0)
}
