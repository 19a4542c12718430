//! One configured exploration of a space: alphabet, candidate stream and filter.

use tessera_config::{FilterPolicy, SpaceDescriptor, TileCatalog};

use crate::alphabet::Alphabet;
use crate::candidate::Candidate;
use crate::enumerate::{multiset_count, Multisets};
use crate::error::SpaceError;
use crate::filter::{memory_count_allowed, Filter};
use crate::isolation::{isolation_candidates, isolation_slots_needed};
use crate::sample::RejectionSampler;

/// Binds a space descriptor, a catalog and a [`FilterPolicy`].
///
/// The policy is fixed at construction; it decides both the candidate
/// stream ([`candidates`](Self::candidates)) and the predicates applied to it.
#[derive(Debug)]
pub struct Explorer<'a> {
    space: &'a SpaceDescriptor,
    catalog: &'a TileCatalog,
    alphabet: Alphabet,
    policy: FilterPolicy,
}

impl<'a> Explorer<'a> {
    /// Validates the descriptor against the catalog and the policy.
    pub fn new(
        space: &'a SpaceDescriptor,
        catalog: &'a TileCatalog,
        policy: FilterPolicy,
    ) -> Result<Self, SpaceError> {
        space.check_against(catalog)?;
        if let Some(count) = space.pinned_memory() {
            if !memory_count_allowed(count as usize) {
                return Err(SpaceError::PinnedMemoryCount { count });
            }
        }
        if policy == FilterPolicy::ThroughputGated && space.thresholds().is_none() {
            return Err(SpaceError::MissingThresholds { policy });
        }

        let alphabet = Alphabet::for_space(space);
        if policy == FilterPolicy::IsolationSweep {
            let needed = isolation_slots_needed(&alphabet);
            let available = space.enumerated_slot_count();
            if available < needed {
                return Err(SpaceError::NotEnoughSlots {
                    policy,
                    needed,
                    available,
                });
            }
        }

        tracing::debug!(
            %policy,
            symbols = alphabet.len(),
            slots = space.enumerated_slot_count(),
            "configured exploration"
        );
        Ok(Self {
            space,
            catalog,
            alphabet,
            policy,
        })
    }

    /// The alphabet candidates are drawn from.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The space descriptor.
    pub fn space(&self) -> &'a SpaceDescriptor {
        self.space
    }

    /// The policy chosen at construction.
    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }

    /// The predicates of this exploration.
    pub fn filter(&self) -> Filter<'_> {
        Filter::new(self.policy, self.space, self.catalog, &self.alphabet)
    }

    fn pinned_memory(&self) -> usize {
        self.space.pinned_memory().unwrap_or(0) as usize
    }

    /// Every candidate of the policy's stream, feasible or not.
    pub fn candidates(&self) -> Box<dyn Iterator<Item = Candidate> + '_> {
        let slots = self.space.enumerated_slot_count();
        let pinned = self.pinned_memory();
        match self.policy {
            FilterPolicy::IsolationSweep => {
                Box::new(isolation_candidates(&self.alphabet, slots, pinned))
            }
            FilterPolicy::Standard | FilterPolicy::ThroughputGated => Box::new(
                Multisets::new(slots, self.alphabet.len())
                    .map(move |symbols| Candidate::new(symbols, pinned)),
            ),
        }
    }

    /// The accepted candidates, lazily, in enumeration order.
    pub fn feasible(&self) -> impl Iterator<Item = Candidate> + '_ {
        let filter = self.filter();
        self.candidates().filter(move |c| filter.accept(c))
    }

    /// Number of candidates in the policy's stream, or `None` on overflow.
    pub fn space_size(&self) -> Option<u128> {
        match self.policy {
            FilterPolicy::IsolationSweep => {
                Some(self.alphabet.accelerator_ids().count() as u128)
            }
            FilterPolicy::Standard | FilterPolicy::ThroughputGated => {
                multiset_count(self.space.enumerated_slot_count(), self.alphabet.len())
            }
        }
    }

    /// Estimated silicon area of a candidate, from the catalog.
    pub fn estimated_area(&self, candidate: &Candidate) -> Option<u64> {
        candidate.estimated_area(&self.alphabet, self.catalog)
    }

    /// A rejection sampler over the same alphabet and slots.
    pub fn sampler(&self, max_attempts: u64) -> RejectionSampler<'_> {
        RejectionSampler::new(
            self.filter(),
            &self.alphabet,
            self.space.enumerated_slot_count(),
            self.pinned_memory(),
            max_attempts,
        )
    }
}
