//! Abstract assignments of tile kinds to the free slots of a grid.

use tessera_common::{configuration_name, SymbolId, TileKind};
use tessera_config::TileCatalog;

use crate::alphabet::Alphabet;

static PINNED_MEMORY: TileKind = TileKind::Memory;

/// One abstract assignment: `pinned_memory` memory tiles followed by the
/// enumerated symbols, filling the free slots in scan order.
///
/// Enumerated candidates keep `symbols` non-decreasing; sampled candidates
/// keep the order they were drawn in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Candidate {
    symbols: Vec<SymbolId>,
    pinned_memory: usize,
}

impl Candidate {
    /// Creates a candidate.
    pub fn new(symbols: Vec<SymbolId>, pinned_memory: usize) -> Self {
        Self {
            symbols,
            pinned_memory,
        }
    }

    /// The enumerated symbols.
    pub fn symbols(&self) -> &[SymbolId] {
        &self.symbols
    }

    /// Number of memory tiles placed ahead of the enumerated symbols.
    pub fn pinned_memory(&self) -> usize {
        self.pinned_memory
    }

    /// Total number of free slots this candidate fills.
    pub fn slot_count(&self) -> usize {
        self.pinned_memory + self.symbols.len()
    }

    /// The tile kinds of every free slot, in scan order.
    pub fn tiles<'a>(&'a self, alphabet: &'a Alphabet) -> impl Iterator<Item = &'a TileKind> {
        std::iter::repeat(&PINNED_MEMORY)
            .take(self.pinned_memory)
            .chain(self.symbols.iter().map(|&id| alphabet.kind(id)))
    }

    /// Number of memory tiles, pinned or enumerated.
    pub fn memory_count(&self, alphabet: &Alphabet) -> usize {
        let enumerated = match alphabet.memory() {
            Some(mem) => self.symbols.iter().filter(|&&id| id == mem).count(),
            None => 0,
        };
        self.pinned_memory + enumerated
    }

    /// The canonical configuration name of this assignment.
    pub fn name(&self, alphabet: &Alphabet) -> String {
        configuration_name(self.tiles(alphabet))
    }

    /// Sum of the catalog areas of every free slot.
    ///
    /// Returns `None` when some tile kind has no area in the catalog.
    pub fn estimated_area(&self, alphabet: &Alphabet, catalog: &TileCatalog) -> Option<u64> {
        self.tiles(alphabet)
            .map(|tile| match tile {
                TileKind::Accelerator { name, parallelism } => {
                    catalog.get(name)?.area_at(*parallelism)
                }
                other => catalog.tile_area(&other.tag()),
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_common::{Grid, WarningSink};
    use tessera_config::{parse_tile_catalog, SpaceDescriptor};

    fn alphabet(pinned: Option<u32>) -> Alphabet {
        let desc =
            SpaceDescriptor::new(Grid::new(3, 2).unwrap(), vec![1, 2], vec!["AES".into()])
                .unwrap();
        let desc = match pinned {
            Some(n) => desc.with_pinned_memory(n).unwrap(),
            None => desc,
        };
        Alphabet::for_space(&desc)
    }

    fn ids(raw: &[u32]) -> Vec<SymbolId> {
        raw.iter().copied().map(SymbolId::from_raw).collect()
    }

    #[test]
    fn name_and_memory_count() {
        let alphabet = alphabet(None);
        let candidate = Candidate::new(ids(&[0, 1, 1, 3]), 0);
        assert_eq!(candidate.name(&alphabet), "config_EMPTY_MEM_MEM_AESx2");
        assert_eq!(candidate.memory_count(&alphabet), 2);
        assert_eq!(candidate.slot_count(), 4);
    }

    #[test]
    fn pinned_memory_comes_first() {
        let alphabet = alphabet(Some(2));
        // Alphabet is EMPTY, AESx1, AESx2.
        let candidate = Candidate::new(ids(&[1, 0]), 2);
        let tags: Vec<String> = candidate.tiles(&alphabet).map(|t| t.tag()).collect();
        assert_eq!(tags, ["MEM", "MEM", "AESx1", "EMPTY"]);
        assert_eq!(candidate.memory_count(&alphabet), 2);
    }

    #[test]
    fn area_sums_catalog_entries() {
        let sink = WarningSink::new();
        let catalog = parse_tile_catalog(
            "ACC_LIST_START\nAES aes 32 1.0 100 180 350 c\nACC_LIST_END\n\
             TILES_AREA_START\nEMPTY 0\nMEM 40\nTILES_AREA_END\n",
            "tiles",
            &sink,
        )
        .unwrap();
        let alphabet = alphabet(None);
        let candidate = Candidate::new(ids(&[0, 1, 2, 3]), 0);
        assert_eq!(candidate.estimated_area(&alphabet, &catalog), Some(320));
    }

    #[test]
    fn area_is_none_when_a_tile_is_missing() {
        let sink = WarningSink::new();
        let catalog = parse_tile_catalog(
            "ACC_LIST_START\nAES aes 32 1.0 100 180 350 c\nACC_LIST_END\n",
            "tiles",
            &sink,
        )
        .unwrap();
        let alphabet = alphabet(None);
        let candidate = Candidate::new(ids(&[1, 2]), 0);
        assert_eq!(candidate.estimated_area(&alphabet, &catalog), None);
    }
}
