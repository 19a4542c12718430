//! Loading of the inputs that drive a configuration-space run.
//!
//! This crate reads the tile-info file into a [`TileCatalog`], the
//! space-descriptor file into a [`SpaceDescriptor`], and the optional
//! `tessera.toml` into a strongly-typed [`RunConfig`].

#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod loader;
pub mod space;
pub mod types;

pub use catalog::{load_tile_catalog, parse_tile_catalog, AcceleratorSpec, TileCatalog};
pub use error::ConfigError;
pub use loader::{load_run_config, load_run_config_from_str};
pub use space::{load_space_descriptor, parse_space_descriptor, SpaceDescriptor};
pub use types::*;
