//! Error types for exploring a configuration space.

use tessera_config::{ConfigError, FilterPolicy};

/// Errors raised while setting up or drawing from a configuration space.
#[derive(Debug, thiserror::Error)]
pub enum SpaceError {
    /// The descriptor does not agree with the tile catalog.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The selected policy needs per-accelerator thresholds and none were given.
    #[error("policy {policy} requires a THR_LIST in the space descriptor")]
    MissingThresholds {
        /// The policy that was requested.
        policy: FilterPolicy,
    },

    /// A pinned memory count that no candidate could ever satisfy.
    #[error("N_MEM {count} is not an allowed memory-tile count (1, 2 or 4)")]
    PinnedMemoryCount {
        /// The pinned count from the descriptor.
        count: u32,
    },

    /// The grid has too few free slots for the requested candidate stream.
    #[error("policy {policy} needs {needed} free slots, the grid leaves {available}")]
    NotEnoughSlots {
        /// The policy that was requested.
        policy: FilterPolicy,
        /// Slots the policy needs.
        needed: usize,
        /// Slots left after the reserved and pinned tiles.
        available: usize,
    },

    /// The rejection sampler ran out of attempts without an accepted draw.
    #[error("no feasible assignment found after {attempts} attempts")]
    InfeasibleSpace {
        /// Number of draws that were rejected.
        attempts: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SpaceError::InfeasibleSpace { attempts: 10 };
        assert_eq!(
            err.to_string(),
            "no feasible assignment found after 10 attempts"
        );

        let err = SpaceError::NotEnoughSlots {
            policy: FilterPolicy::IsolationSweep,
            needed: 2,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "policy isolation-sweep needs 2 free slots, the grid leaves 1"
        );
    }

    #[test]
    fn config_error_is_transparent() {
        let err: SpaceError = ConfigError::UnknownAccelerator("FFT".into()).into();
        assert_eq!(err.to_string(), "unknown accelerator 'FFT'");
    }
}
