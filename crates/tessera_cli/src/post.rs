//! The `tessera shuffle` and `tessera pick` commands.

use std::path::Path;

use tessera_emit::{pick_lines, shuffle_lines};

use crate::pipeline::make_rng;
use crate::{GlobalArgs, PickArgs, ShuffleArgs};

/// Shuffles a file's lines in place.
pub fn run_shuffle(args: &ShuffleArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut rng = make_rng(args.seed);
    let lines = shuffle_lines(Path::new(&args.file), &mut rng)?;
    if !global.quiet {
        eprintln!("  Shuffled {lines} line(s) of {}", args.file);
    }
    Ok(0)
}

/// Copies `count` random distinct lines into a new file.
pub fn run_pick(args: &PickArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut rng = make_rng(args.seed);
    pick_lines(
        Path::new(&args.input),
        Path::new(&args.output),
        args.count,
        &mut rng,
    )?;
    if !global.quiet {
        eprintln!(
            "  {} random line(s) copied from {} to {}",
            args.count, args.input, args.output
        );
    }
    Ok(0)
}
