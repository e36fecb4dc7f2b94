//! Actor-related state types.
//!
//! - ActorState: identity, role, health, shield, inventory and display info
//! - Inventory: bounded item storage for actors

pub mod inventory;

pub use inventory::{INVENTORY_SLOTS, InventoryState};

use super::{EntityId, Item, ItemSerial, RoleKind, Vitals};

/// Host-side state of a single entity.
///
/// # Invariants
///
/// - `held` is either `None` or the serial of an item in `inventory`
/// - `alive` mirrors `role.is_alive()` after every role change
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    pub nickname: String,
    pub role: RoleKind,
    pub alive: bool,
    pub vitals: Vitals,
    /// Artificial health layered on top of `vitals`.
    pub shield: f32,
    pub held: Option<ItemSerial>,
    pub inventory: InventoryState,
    /// Label shown to other entities next to the nickname.
    pub custom_info: String,
}

impl ActorState {
    pub fn new(id: EntityId, nickname: impl Into<String>, role: RoleKind) -> Self {
        Self {
            id,
            nickname: nickname.into(),
            role,
            alive: role.is_alive(),
            vitals: Vitals::new(100.0, 100.0),
            shield: 0.0,
            held: None,
            inventory: InventoryState::empty(),
            custom_info: String::new(),
        }
    }

    pub fn with_vitals(mut self, vitals: Vitals) -> Self {
        self.vitals = vitals;
        self
    }

    pub fn with_custom_info(mut self, info: impl Into<String>) -> Self {
        self.custom_info = info.into();
        self
    }

    /// Currently held item, resolved against the inventory.
    pub fn held_item(&self) -> Option<Item> {
        self.held
            .and_then(|serial| self.inventory.get(serial))
            .copied()
    }
}
