//! Feasibility predicates over candidates.
//!
//! A candidate is accepted when its memory-tile count is 1, 2 or 4 and
//! every required accelerator appears at least once. Under
//! [`FilterPolicy::ThroughputGated`] each accelerator's aggregate throughput
//! must also reach its threshold. Isolation-sweep candidates are built
//! feasible and always pass.

pub use tessera_common::{memory_count_allowed, ALLOWED_MEMORY_COUNTS};
use tessera_common::TileKind;
use tessera_config::{FilterPolicy, SpaceDescriptor, TileCatalog};

use crate::alphabet::Alphabet;
use crate::candidate::Candidate;

/// The policy used when the run does not name one.
///
/// Descriptors that carry thresholds are gated on them.
pub fn default_policy(space: &SpaceDescriptor) -> FilterPolicy {
    if space.thresholds().is_some() {
        FilterPolicy::ThroughputGated
    } else {
        FilterPolicy::Standard
    }
}

/// Applies one policy's predicates to candidates of a fixed space.
#[derive(Clone, Copy, Debug)]
pub struct Filter<'a> {
    policy: FilterPolicy,
    space: &'a SpaceDescriptor,
    catalog: &'a TileCatalog,
    alphabet: &'a Alphabet,
}

impl<'a> Filter<'a> {
    /// Creates a filter.
    pub fn new(
        policy: FilterPolicy,
        space: &'a SpaceDescriptor,
        catalog: &'a TileCatalog,
        alphabet: &'a Alphabet,
    ) -> Self {
        Self {
            policy,
            space,
            catalog,
            alphabet,
        }
    }

    /// The policy this filter applies.
    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }

    /// Returns `true` if the candidate satisfies every predicate of the policy.
    pub fn accept(&self, candidate: &Candidate) -> bool {
        match self.policy {
            FilterPolicy::IsolationSweep => true,
            FilterPolicy::Standard => self.memory_and_coverage(candidate),
            FilterPolicy::ThroughputGated => {
                self.memory_and_coverage(candidate) && self.meets_thresholds(candidate)
            }
        }
    }

    /// The memory-count and accelerator-coverage predicates.
    pub fn memory_and_coverage(&self, candidate: &Candidate) -> bool {
        if !memory_count_allowed(candidate.memory_count(self.alphabet)) {
            return false;
        }
        let mut covered = vec![false; self.space.required_accelerators().len()];
        for &id in candidate.symbols() {
            if let Some(idx) = self.alphabet.required_index(id) {
                covered[idx] = true;
            }
        }
        covered.into_iter().all(|c| c)
    }

    /// Σ(parallelism × throughput) per accelerator against its threshold.
    ///
    /// Always `true` when the descriptor has no thresholds.
    pub fn meets_thresholds(&self, candidate: &Candidate) -> bool {
        let Some(thresholds) = self.space.thresholds() else {
            return true;
        };
        let mut totals = vec![0.0_f64; thresholds.len()];
        for &id in candidate.symbols() {
            let Some(idx) = self.alphabet.required_index(id) else {
                continue;
            };
            if let TileKind::Accelerator { name, parallelism } = self.alphabet.kind(id) {
                if let Some(spec) = self.catalog.get(name) {
                    totals[idx] += spec.throughput_at(*parallelism);
                }
            }
        }
        totals
            .iter()
            .zip(thresholds)
            .all(|(total, threshold)| total >= threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_common::{Grid, SymbolId, WarningSink};
    use tessera_config::parse_tile_catalog;

    const TILES: &str = "\
ACC_LIST_START
AES aes 32 1.5 100 180 350 c
SHA sha 8 0.5 60 110 210 c
ACC_LIST_END
";

    fn fixture(thresholds: Option<Vec<f64>>) -> (SpaceDescriptor, TileCatalog) {
        let sink = WarningSink::new();
        let catalog = parse_tile_catalog(TILES, "tiles", &sink).unwrap();
        let mut desc = SpaceDescriptor::new(
            Grid::new(3, 2).unwrap(),
            vec![1, 2],
            vec!["AES".into(), "SHA".into()],
        )
        .unwrap();
        if let Some(t) = thresholds {
            desc = desc.with_thresholds(t).unwrap();
        }
        (desc, catalog)
    }

    // Alphabet: 0 EMPTY, 1 MEM, 2 AESx1, 3 AESx2, 4 SHAx1, 5 SHAx2.
    fn candidate(raw: &[u32]) -> Candidate {
        Candidate::new(raw.iter().copied().map(SymbolId::from_raw).collect(), 0)
    }

    #[test]
    fn standard_requires_memory_and_coverage() {
        let (desc, catalog) = fixture(None);
        let alphabet = Alphabet::for_space(&desc);
        let filter = Filter::new(FilterPolicy::Standard, &desc, &catalog, &alphabet);
        assert!(filter.accept(&candidate(&[1, 2, 4, 0])));
        assert!(filter.accept(&candidate(&[1, 1, 3, 5])));
        // no memory
        assert!(!filter.accept(&candidate(&[0, 0, 2, 4])));
        // SHA missing
        assert!(!filter.accept(&candidate(&[0, 1, 2, 3])));
    }

    #[test]
    fn three_memory_tiles_rejected() {
        let (desc, catalog) = fixture(None);
        let desc = SpaceDescriptor::new(
            Grid::new(3, 3).unwrap(),
            desc.parallelism_levels().to_vec(),
            desc.required_accelerators().to_vec(),
        )
        .unwrap();
        let alphabet = Alphabet::for_space(&desc);
        let filter = Filter::new(FilterPolicy::Standard, &desc, &catalog, &alphabet);
        assert!(!filter.accept(&candidate(&[0, 0, 1, 1, 1, 2, 4])));
        assert!(filter.accept(&candidate(&[0, 1, 1, 1, 1, 2, 4])));
    }

    #[test]
    fn throughput_gate() {
        // AES needs 3.0 (two x1 cores or one x2), SHA needs 1.0 (one x2).
        let (desc, catalog) = fixture(Some(vec![3.0, 1.0]));
        let alphabet = Alphabet::for_space(&desc);
        let gated = Filter::new(FilterPolicy::ThroughputGated, &desc, &catalog, &alphabet);
        let standard = Filter::new(FilterPolicy::Standard, &desc, &catalog, &alphabet);

        let weak = candidate(&[1, 2, 4, 0]);
        assert!(standard.accept(&weak));
        assert!(!gated.accept(&weak));

        assert!(gated.accept(&candidate(&[1, 3, 5, 0])));
        assert!(gated.accept(&candidate(&[1, 2, 2, 5])));
        assert!(!gated.accept(&candidate(&[1, 2, 5, 5])));
    }

    #[test]
    fn default_policy_follows_thresholds() {
        let (plain, _) = fixture(None);
        assert_eq!(default_policy(&plain), FilterPolicy::Standard);
        let (gated, _) = fixture(Some(vec![1.0, 1.0]));
        assert_eq!(default_policy(&gated), FilterPolicy::ThroughputGated);
    }

    #[test]
    fn pinned_memory_counts_toward_predicate() {
        let (desc, catalog) = fixture(None);
        let desc = desc.with_pinned_memory(2).unwrap();
        // Alphabet: 0 EMPTY, 1 AESx1, 2 AESx2, 3 SHAx1, 4 SHAx2.
        let alphabet = Alphabet::for_space(&desc);
        let filter = Filter::new(FilterPolicy::Standard, &desc, &catalog, &alphabet);
        let c = Candidate::new(vec![SymbolId::from_raw(1), SymbolId::from_raw(3)], 2);
        assert!(filter.accept(&c));
    }
}
