//! The `tessera generate` command: enumerate, filter, expand and write.

use rand::seq::IteratorRandom;
use tessera_config::FilterPolicy;
use tessera_emit::{shuffle_lines, Sharder, INDEX_FILE};
use tessera_expand::expand_enumerated;
use tessera_space::{default_policy, Explorer};

use crate::pipeline::{load_config, load_inputs, make_rng, print_counts, resolve_path};
use crate::{GenerateArgs, GlobalArgs};

/// Runs the generate command.
///
/// Every feasible configuration (or the `--limit` first ones, or a uniform
/// `--random-sample` of them) is expanded and written round-robin across
/// the output partitions. Prints the size of the candidate space and the
/// number of feasible configurations.
pub fn run(args: &GenerateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config(global)?;
    let (catalog, space) = load_inputs(&args.inputs, &config, global)?;

    let out = resolve_path(args.out.as_deref(), config.output.dir.as_deref(), "out")?;
    let partitions = args.partitions.unwrap_or(config.output.partitions);
    let policy = args
        .policy
        .map(FilterPolicy::from)
        .or(config.generate.policy)
        .unwrap_or_else(|| default_policy(&space));
    let (limit, random_sample) = if args.limit.is_some() || args.random_sample.is_some() {
        (args.limit, args.random_sample)
    } else {
        (config.generate.limit, config.generate.random_sample)
    };
    if random_sample == Some(0) {
        return Err("--random-sample must be at least 1".into());
    }
    let shuffle = args.shuffle || config.generate.shuffle;
    let mut rng = make_rng(args.seed.or(config.generate.seed));
    let cpu_arch = config.soc.cpu_arch.as_str();

    let explorer = Explorer::new(&space, &catalog, policy)?;
    if !global.quiet {
        eprintln!(
            "  Exploring {} free slot(s) with the {policy} policy",
            space.enumerated_slot_count()
        );
    }

    let mut sharder = Sharder::create(&out, partitions)?;
    let grid = space.grid();
    let feasible = match random_sample {
        Some(size) => {
            let mut seen: u64 = 0;
            let picked = explorer
                .feasible()
                .inspect(|_| seen += 1)
                .choose_multiple(&mut rng, size);
            for candidate in picked {
                let expanded =
                    expand_enumerated(grid, candidate.tiles(explorer.alphabet()), &catalog, cpu_arch)?;
                sharder.emit(&expanded)?;
            }
            seen
        }
        None => {
            for candidate in explorer.feasible().take(limit.unwrap_or(usize::MAX)) {
                let expanded =
                    expand_enumerated(grid, candidate.tiles(explorer.alphabet()), &catalog, cpu_arch)?;
                sharder.emit(&expanded)?;
            }
            sharder.accepted()
        }
    };
    let written = sharder.accepted();
    let summaries = sharder.finish()?;

    if shuffle {
        for summary in &summaries {
            shuffle_lines(&summary.dir.join(INDEX_FILE), &mut rng)?;
        }
    }

    if !global.quiet {
        eprintln!(
            "  Wrote {written} configuration(s) to {} partition(s)",
            summaries.len()
        );
        if global.verbose {
            for summary in &summaries {
                eprintln!("    {}: {}", summary.dir.display(), summary.written);
            }
        }
    }
    print_counts(explorer.space_size(), feasible);
    Ok(0)
}
