//! Round-robin assignment of accepted configurations to partitions.

/// Counts accepted configurations and maps each to a partition.
///
/// The `k`-th accepted configuration (0-based) goes to partition
/// `k % partitions`, so partition sizes never differ by more than one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundRobin {
    partitions: usize,
    accepted: u64,
}

impl RoundRobin {
    /// Creates an accumulator over `partitions` partitions.
    ///
    /// `partitions` must be non-zero.
    pub fn new(partitions: usize) -> Self {
        debug_assert!(partitions > 0);
        Self {
            partitions,
            accepted: 0,
        }
    }

    /// Records one accepted configuration and returns its partition.
    pub fn next_partition(&mut self) -> usize {
        let partition = (self.accepted % self.partitions as u64) as usize;
        self.accepted += 1;
        partition
    }

    /// Number of configurations recorded so far.
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Number of partitions.
    pub fn partitions(&self) -> usize {
        self.partitions
    }
}
