//! Rejection sampling of single feasible assignments.
//!
//! Each attempt draws one symbol per enumerated slot, independently and
//! uniformly from the alphabet, and keeps the draw if it passes the
//! memory-count and coverage predicates. Thresholds are not applied.

use rand::seq::SliceRandom;
use rand::Rng;
use tessera_common::SymbolId;

use crate::alphabet::Alphabet;
use crate::candidate::Candidate;
use crate::error::SpaceError;
use crate::filter::Filter;

/// Draws random feasible candidates, giving up after a fixed number of attempts.
#[derive(Clone, Copy, Debug)]
pub struct RejectionSampler<'a> {
    filter: Filter<'a>,
    alphabet: &'a Alphabet,
    slots: usize,
    pinned_memory: usize,
    max_attempts: u64,
}

impl<'a> RejectionSampler<'a> {
    /// Creates a sampler over `slots` enumerated slots.
    pub fn new(
        filter: Filter<'a>,
        alphabet: &'a Alphabet,
        slots: usize,
        pinned_memory: usize,
        max_attempts: u64,
    ) -> Self {
        Self {
            filter,
            alphabet,
            slots,
            pinned_memory,
            max_attempts,
        }
    }

    /// Draws until a candidate is accepted.
    ///
    /// Fails with [`SpaceError::InfeasibleSpace`] once `max_attempts` draws
    /// have all been rejected, or at once if the alphabet is empty.
    pub fn sample(&self, rng: &mut impl Rng) -> Result<Candidate, SpaceError> {
        let ids: Vec<SymbolId> = self.alphabet.ids().collect();
        for attempt in 1..=self.max_attempts {
            let symbols: Option<Vec<SymbolId>> =
                (0..self.slots).map(|_| ids.choose(&mut *rng).copied()).collect();
            let Some(symbols) = symbols else {
                break;
            };
            let candidate = Candidate::new(symbols, self.pinned_memory);
            if self.filter.memory_and_coverage(&candidate) {
                tracing::debug!(attempt, "accepted sample {}", candidate.name(self.alphabet));
                return Ok(candidate);
            }
        }
        Err(SpaceError::InfeasibleSpace {
            attempts: self.max_attempts,
        })
    }
}
