//! Properties that hold for every configuration expanded from an accepted candidate.

use std::collections::BTreeMap;

use tessera_common::{Grid, TileKind, WarningSink};
use tessera_config::{parse_tile_catalog, FilterPolicy, SpaceDescriptor, TileCatalog};
use tessera_expand::{expand_enumerated, parse_ccf, MemorySizes};
use tessera_space::Explorer;

fn catalog() -> TileCatalog {
    let sink = WarningSink::new();
    parse_tile_catalog(
        "ACC_LIST_START\n\
         AES aes_vivado 32 1.5 100 180 350 compute\n\
         SHA sha_vivado 8 0.5 60 110 210 memory\n\
         ACC_LIST_END\n",
        "tiles",
        &sink,
    )
    .unwrap()
}

fn space() -> SpaceDescriptor {
    SpaceDescriptor::new(
        Grid::new(3, 2).unwrap(),
        vec![1, 2, 4],
        vec!["AES".into(), "SHA".into()],
    )
    .unwrap()
}

#[test]
fn every_expansion_holds_the_invariants() {
    let catalog = catalog();
    let desc = space();
    let explorer = Explorer::new(&desc, &catalog, FilterPolicy::Standard).unwrap();
    let grid = desc.grid();

    let mut checked = 0;
    for candidate in explorer.feasible() {
        let config =
            expand_enumerated(grid, candidate.tiles(explorer.alphabet()), &catalog, "ariane")
                .unwrap();
        checked += 1;

        // Exactly one CPU and one I/O tile, at the reserved cells.
        let cpus: Vec<_> = config.tiles().iter().filter(|t| t.kind == TileKind::Cpu).collect();
        let ios: Vec<_> = config.tiles().iter().filter(|t| t.kind == TileKind::Io).collect();
        assert_eq!(cpus.len(), 1);
        assert_eq!(ios.len(), 1);
        assert_eq!(cpus[0].position, grid.cpu_cell());
        assert_eq!(ios[0].position, grid.io_cell());

        // At most one PLL per domain, on the first tile of that domain that can own one.
        let mut first_clocked: BTreeMap<u32, usize> = BTreeMap::new();
        for (idx, tile) in config.tiles().iter().enumerate() {
            if tile.kind.is_clocked() {
                first_clocked.entry(tile.clock_domain).or_insert(idx);
            }
        }
        for (idx, tile) in config.tiles().iter().enumerate() {
            let owner = first_clocked.get(&tile.clock_domain) == Some(&idx);
            assert_eq!(tile.has_pll, owner, "{} at {}", config.name(), tile.position);
        }

        assert_eq!(
            config.memory_sizes(),
            MemorySizes::split(config.memory_tile_count()).unwrap()
        );
        assert_eq!(config.name(), candidate.name(explorer.alphabet()));

        let text = config.to_ccf();
        let reparsed = parse_ccf(&text, &catalog).unwrap();
        assert_eq!(reparsed.to_ccf(), text);
    }
    assert!(checked > 0);
}

#[test]
fn sampled_candidates_expand() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let catalog = catalog();
    let desc = space();
    let explorer = Explorer::new(&desc, &catalog, FilterPolicy::Standard).unwrap();
    let sampler = explorer.sampler(100_000);
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..10 {
        let candidate = sampler.sample(&mut rng).unwrap();
        let config = expand_enumerated(
            desc.grid(),
            candidate.tiles(explorer.alphabet()),
            &catalog,
            "ariane",
        )
        .unwrap();
        assert!([1, 2, 4].contains(&config.memory_tile_count()));
    }
}
