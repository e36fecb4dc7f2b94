//! Data-driven configuration for the ability engine.
//!
//! This crate provides loaders for TOML data files:
//! - Ability configuration (loadout, heal, disguise and enforcement tunables)
//!
//! Loaders deserialize `ability-core` types directly with serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult};
