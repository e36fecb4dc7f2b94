pub mod actor;
pub mod common;
pub mod item;
pub mod role;

// Re-export actor types
pub use actor::{ActorState, INVENTORY_SLOTS, InventoryState};

// Re-export common types
pub use common::{EntityId, Timestamp, Vitals};

// Re-export item types
pub use item::{Item, ItemKind, ItemSerial};

// Re-export role types
pub use role::{RoleKind, SpawnReason, Team};
