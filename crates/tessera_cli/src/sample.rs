//! The `tessera sample` command: one random feasible configuration by rejection sampling.

use std::path::Path;

use tessera_config::FilterPolicy;
use tessera_emit::write_single;
use tessera_expand::{expand_enumerated, Placement};
use tessera_space::Explorer;

use crate::pipeline::{load_config, load_inputs, make_rng};
use crate::{GlobalArgs, SampleArgs};

/// Runs the sample command.
///
/// The draw is written as a minimal placement file (`--mcf`), as an expanded
/// configuration (`--out`), or both. With neither, its name is printed.
pub fn run(args: &SampleArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config(global)?;
    let (catalog, space) = load_inputs(&args.inputs, &config, global)?;
    let max_attempts = args.max_attempts.unwrap_or(config.sample.max_attempts);
    let mut rng = make_rng(args.seed.or(config.generate.seed));

    let explorer = Explorer::new(&space, &catalog, FilterPolicy::Standard)?;
    let candidate = explorer.sampler(max_attempts).sample(&mut rng)?;
    let name = candidate.name(explorer.alphabet());

    if let Some(mcf) = &args.mcf {
        let accelerators = space.required_accelerators().len() as u32;
        let placement = Placement::from_assignment(
            space.grid(),
            candidate.tiles(explorer.alphabet()),
            accelerators,
        )?;
        std::fs::write(mcf, placement.render()?)
            .map_err(|e| format!("cannot write {mcf}: {e}"))?;
        if !global.quiet {
            eprintln!("  Wrote placement {mcf}");
        }
    }

    if let Some(out) = &args.out {
        let expanded = expand_enumerated(
            space.grid(),
            candidate.tiles(explorer.alphabet()),
            &catalog,
            &config.soc.cpu_arch,
        )?;
        let path = write_single(Path::new(out), &expanded)?;
        if !global.quiet {
            eprintln!("  Wrote {}", path.display());
        }
    }

    if args.mcf.is_none() && args.out.is_none() {
        println!("{name}");
    }
    Ok(0)
}
