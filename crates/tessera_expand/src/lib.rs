//! Expansion of abstract tile assignments into complete SoC configurations.
//!
//! Two paths produce a [`Configuration`]:
//!
//! - **Enumerated** ([`expand_enumerated`]): the kinds of the free slots are
//!   given in scan order; CPU and I/O take the reserved cells.
//! - **Minimal** ([`expand_placement`]): a [`Placement`] declares positions
//!   and clock domains; CPU and I/O take the first two cells left over.
//!
//! Both paths assign PLLs (first clocked tile per clock domain, in scan
//! order) and split the memory budget. Configurations serialize to the
//! `.ccf` format with [`Configuration::to_ccf`] and parse back with
//! [`parse_ccf`].

#![warn(missing_docs)]

pub mod ccf;
pub mod configuration;
pub mod error;
pub mod memory;
pub mod placement;
pub mod pll;
pub mod record;

pub use ccf::{parse_ccf, CcfDocument, CcfEntry};
pub use configuration::{expand_enumerated, Configuration};
pub use error::{CcfError, ExpandError};
pub use memory::{MemorySizes, MIN_MAIN, TOTAL_MAIN_BUDGET};
pub use placement::{
    expand_placement, load_placement, parse_placement, Placement, PlacementEntry,
};
pub use pll::assign_plls;
pub use record::{TileRecord, ACCELERATOR_DOMAIN, CPU_DOMAIN, DEFAULT_DOMAIN};
