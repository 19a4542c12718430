//! The symbol alphabet candidates are drawn from.
//!
//! Symbol 0 is always `Empty`. Unless the descriptor pins the memory count,
//! symbol 1 is `Memory`. The remaining symbols are every required
//! accelerator at every parallelism level, grouped by accelerator in
//! declaration order.

use tessera_common::{SymbolId, TileKind};
use tessera_config::SpaceDescriptor;

/// The ordered set of tile kinds an enumerated slot may take.
#[derive(Clone, Debug, PartialEq)]
pub struct Alphabet {
    symbols: Vec<TileKind>,
    /// For each symbol, the index of its accelerator in the required list.
    owners: Vec<Option<usize>>,
    memory: Option<SymbolId>,
}

impl Alphabet {
    /// Builds the alphabet of a space descriptor.
    pub fn for_space(space: &SpaceDescriptor) -> Self {
        let mut symbols = vec![TileKind::Empty];
        let mut owners = vec![None];
        let mut memory = None;
        if space.pinned_memory().is_none() {
            memory = Some(SymbolId::from_raw(1));
            symbols.push(TileKind::Memory);
            owners.push(None);
        }
        for (idx, name) in space.required_accelerators().iter().enumerate() {
            for &level in space.parallelism_levels() {
                symbols.push(TileKind::accelerator(name.clone(), level));
                owners.push(Some(idx));
            }
        }
        Self {
            symbols,
            owners,
            memory,
        }
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false`: the alphabet contains at least `Empty`.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The tile kind a symbol stands for.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this alphabet.
    pub fn kind(&self, id: SymbolId) -> &TileKind {
        &self.symbols[id.index()]
    }

    /// The `Empty` symbol.
    pub fn empty(&self) -> SymbolId {
        SymbolId::from_raw(0)
    }

    /// The `Memory` symbol, absent when the memory count is pinned.
    pub fn memory(&self) -> Option<SymbolId> {
        self.memory
    }

    /// Position of the symbol's accelerator in the descriptor's required list.
    pub fn required_index(&self, id: SymbolId) -> Option<usize> {
        self.owners.get(id.index()).copied().flatten()
    }

    /// All symbols in order.
    pub fn ids(&self) -> impl Iterator<Item = SymbolId> {
        (0..self.symbols.len() as u32).map(SymbolId::from_raw)
    }

    /// Accelerator symbols only, grouped by accelerator then parallelism level.
    pub fn accelerator_ids(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.ids().filter(|id| self.required_index(*id).is_some())
    }
}
