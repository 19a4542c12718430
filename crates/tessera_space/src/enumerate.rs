//! Lazy enumeration of multisets over the alphabet.
//!
//! A multiset of `n` symbols drawn from `k` kinds is represented by its
//! unique non-decreasing sequence of symbol indices. The iterator walks
//! those sequences in lexicographic order without materializing the space.

use tessera_common::SymbolId;

/// Iterator over every non-decreasing length-`n` sequence of symbols `0..k`.
///
/// Yields exactly `C(n + k - 1, n)` items: one per multiset.
#[derive(Clone, Debug)]
pub struct Multisets {
    kinds: u32,
    current: Option<Vec<u32>>,
}

impl Multisets {
    /// Creates an enumerator of `slots`-element multisets over `kinds` symbols.
    pub fn new(slots: usize, kinds: usize) -> Self {
        let current = if kinds == 0 && slots > 0 {
            None
        } else {
            Some(vec![0; slots])
        };
        Self {
            kinds: kinds as u32,
            current,
        }
    }
}

impl Iterator for Multisets {
    type Item = Vec<SymbolId>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.as_mut()?;
        let item = current.iter().copied().map(SymbolId::from_raw).collect();

        // Advance: bump the rightmost position that can still grow and
        // reset everything after it to the same value.
        let last = self.kinds.saturating_sub(1);
        match current.iter().rposition(|&s| s < last) {
            Some(pos) => {
                let next = current[pos] + 1;
                for slot in &mut current[pos..] {
                    *slot = next;
                }
            }
            None => self.current = None,
        }
        Some(item)
    }
}

/// Number of multisets of `slots` elements over `kinds` symbols, `C(slots + kinds - 1, slots)`.
///
/// Returns `None` if the count does not fit in a `u128`.
pub fn multiset_count(slots: usize, kinds: usize) -> Option<u128> {
    if kinds == 0 {
        return Some(u128::from(slots == 0));
    }
    let mut count: u128 = 1;
    for i in 1..=slots as u128 {
        // count * (kinds - 1 + i) / i stays integral: it is C(kinds - 1 + i, i).
        count = count.checked_mul(kinds as u128 - 1 + i)? / i;
    }
    Some(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(items: Vec<Vec<SymbolId>>) -> Vec<Vec<u32>> {
        items
            .into_iter()
            .map(|v| v.into_iter().map(SymbolId::as_raw).collect())
            .collect()
    }

    #[test]
    fn lexicographic_order() {
        let all = raw(Multisets::new(2, 3).collect());
        assert_eq!(
            all,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 1],
                vec![1, 2],
                vec![2, 2],
            ]
        );
    }

    #[test]
    fn count_matches_formula() {
        for slots in 0..6 {
            for kinds in 1..6 {
                let produced = Multisets::new(slots, kinds).count() as u128;
                assert_eq!(Some(produced), multiset_count(slots, kinds), "n={slots} k={kinds}");
            }
        }
    }

    #[test]
    fn every_item_is_non_decreasing() {
        for item in Multisets::new(4, 4) {
            assert!(item.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn degenerate_shapes() {
        assert_eq!(raw(Multisets::new(0, 3).collect()), vec![Vec::<u32>::new()]);
        assert_eq!(Multisets::new(3, 0).count(), 0);
        assert_eq!(Multisets::new(3, 1).count(), 1);
        assert_eq!(multiset_count(0, 0), Some(1));
        assert_eq!(multiset_count(3, 0), Some(0));
    }

    #[test]
    fn known_sizes() {
        assert_eq!(multiset_count(4, 4), Some(35));
        assert_eq!(multiset_count(14, 14), Some(20_058_300));
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(multiset_count(200, 200), None);
    }
}
