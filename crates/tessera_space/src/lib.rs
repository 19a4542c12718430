//! Candidate generation and feasibility filtering for tile-grid SoC configurations.
//!
//! A space descriptor fixes the grid, the parallelism levels and the
//! accelerators that must appear. This crate turns it into:
//!
//! - an [`Alphabet`] of tile kinds one free slot may hold,
//! - a lazy stream of [`Candidate`]s (every multiset of the alphabet, or the
//!   isolation sweep),
//! - a [`Filter`] that accepts the feasible ones under a
//!   [`FilterPolicy`](tessera_config::FilterPolicy),
//! - a [`RejectionSampler`] for drawing single random feasible candidates.
//!
//! # Usage
//!
//! ```ignore
//! use tessera_space::{default_policy, Explorer};
//!
//! let explorer = Explorer::new(&space, &catalog, default_policy(&space))?;
//! for candidate in explorer.feasible() {
//!     println!("{}", candidate.name(explorer.alphabet()));
//! }
//! ```

#![warn(missing_docs)]

pub mod alphabet;
pub mod candidate;
pub mod enumerate;
pub mod error;
pub mod explorer;
pub mod filter;
pub mod isolation;
pub mod sample;

pub use alphabet::Alphabet;
pub use candidate::Candidate;
pub use enumerate::{multiset_count, Multisets};
pub use error::SpaceError;
pub use explorer::Explorer;
pub use filter::{default_policy, memory_count_allowed, Filter, ALLOWED_MEMORY_COUNTS};
pub use isolation::isolation_candidates;
pub use sample::RejectionSampler;
