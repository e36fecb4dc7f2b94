//! Data model for role-bound timed abilities.
//!
//! `ability-core` defines the types every other crate in the workspace agrees
//! on: entity identity, roles and teams, items and inventories, the ability
//! configuration and the [`World`] collaborator trait through which the
//! runtime reads and writes host-owned entity state. [`WorldState`] is an
//! in-memory implementation used by tests and the simulation host.
pub mod config;
pub mod error;
pub mod state;
pub mod world;

pub use config::{AbilityConfig, ConfigError};
pub use error::{AbilityError, ErrorSeverity, ReportedError};
pub use state::{
    ActorState, EntityId, INVENTORY_SLOTS, InventoryState, Item, ItemKind, ItemSerial, Notification,
    RoleKind, SpawnReason, Team, Timestamp, Vitals, WorldError, WorldState,
};
pub use world::World;
