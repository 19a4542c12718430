//! Isolation sweep: each accelerator configuration alone on the grid.
//!
//! One candidate per (accelerator, parallelism) pair: the accelerator takes
//! the first enumerated slot, one memory tile the second (unless memory is
//! pinned), and every other slot is empty.

use tessera_common::SymbolId;

use crate::alphabet::Alphabet;
use crate::candidate::Candidate;

/// Enumerated slots an isolation candidate needs.
pub fn isolation_slots_needed(alphabet: &Alphabet) -> usize {
    if alphabet.memory().is_some() {
        2
    } else {
        1
    }
}

/// Iterates over the isolation-sweep candidates, grouped by accelerator.
///
/// `slots` is the number of enumerated slots; it must be at least
/// [`isolation_slots_needed`].
pub fn isolation_candidates<'a>(
    alphabet: &'a Alphabet,
    slots: usize,
    pinned_memory: usize,
) -> impl Iterator<Item = Candidate> + 'a {
    alphabet.accelerator_ids().map(move |acc| {
        let mut symbols: Vec<SymbolId> = Vec::with_capacity(slots);
        symbols.push(acc);
        symbols.extend(alphabet.memory());
        symbols.resize(slots, alphabet.empty());
        Candidate::new(symbols, pinned_memory)
    })
}
