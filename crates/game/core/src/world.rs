//! Entity collaborator interface.
//!
//! The host simulation owns every entity. The runtime only touches the fields
//! exposed here, always addressed by [`EntityId`]. Accessors for an id the host
//! does not know return `None`/empty values and mutators are silently ignored,
//! so callers never have to treat a vanished entity as an error.

use std::time::Duration;

use crate::state::{EntityId, Item, ItemKind, ItemSerial, RoleKind, SpawnReason, Vitals};

/// Read/write access to host-owned entity state.
///
/// The trait is object safe; runtime task bodies receive `&mut dyn World`.
pub trait World {
    /// Every entity currently known to the host, in a stable order.
    fn entities(&self) -> Vec<EntityId>;

    fn contains(&self, id: EntityId) -> bool;

    fn is_alive(&self, id: EntityId) -> bool;

    fn nickname(&self, id: EntityId) -> Option<String>;

    fn role(&self, id: EntityId) -> Option<RoleKind>;

    /// Moves the entity into `role`.
    ///
    /// This is a plain state write; it does not emit lifecycle events.
    fn set_role(&mut self, id: EntityId, role: RoleKind, reason: SpawnReason);

    fn health(&self, id: EntityId) -> Option<Vitals>;

    fn set_health(&mut self, id: EntityId, current: f32);

    fn set_max_health(&mut self, id: EntityId, maximum: f32);

    fn shield(&self, id: EntityId) -> Option<f32>;

    fn set_shield(&mut self, id: EntityId, value: f32);

    /// Inventory contents in slot order.
    fn items(&self, id: EntityId) -> Vec<Item>;

    fn held_item(&self, id: EntityId) -> Option<Item>;

    /// Selects the held item. Serials not present in the inventory are ignored.
    fn set_held_item(&mut self, id: EntityId, serial: Option<ItemSerial>);

    /// Creates a new item in the entity's inventory.
    ///
    /// Returns `None` when the host could not create it (unknown or dead
    /// entity, full inventory).
    fn add_item(&mut self, id: EntityId, kind: ItemKind) -> Option<Item>;

    fn clear_inventory(&mut self, id: EntityId);

    /// Display identity shown to other entities.
    fn custom_info(&self, id: EntityId) -> Option<String>;

    fn set_custom_info(&mut self, id: EntityId, info: String);

    /// Shows a transient hint to a single entity.
    fn notify(&mut self, id: EntityId, text: &str, duration: Duration);

    /// Returns true if the entity carries at least one item of `kind`.
    fn has_item_kind(&self, id: EntityId, kind: ItemKind) -> bool {
        self.items(id).iter().any(|item| item.kind == kind)
    }

    /// First item in slot order.
    fn first_item(&self, id: EntityId) -> Option<Item> {
        self.items(id).first().copied()
    }
}
