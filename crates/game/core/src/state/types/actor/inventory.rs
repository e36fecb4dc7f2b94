//! Inventory storage for actors.

use arrayvec::ArrayVec;

use crate::state::types::{Item, ItemKind, ItemSerial};

/// Maximum number of items an actor can carry.
pub const INVENTORY_SLOTS: usize = 8;

/// Ordered, bounded item collection. Slot order is insertion order.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryState {
    pub items: ArrayVec<Item, INVENTORY_SLOTS>,
}

impl InventoryState {
    pub const CAPACITY: usize = INVENTORY_SLOTS;

    pub fn empty() -> Self {
        Self {
            items: ArrayVec::new(),
        }
    }

    /// Appends an item; returns it back when the inventory is full.
    pub fn push(&mut self, item: Item) -> Result<(), Item> {
        self.items.try_push(item).map_err(|err| err.element())
    }

    pub fn remove(&mut self, serial: ItemSerial) -> Option<Item> {
        let index = self.items.iter().position(|item| item.serial == serial)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, serial: ItemSerial) -> Option<&Item> {
        self.items.iter().find(|item| item.serial == serial)
    }

    pub fn first(&self) -> Option<&Item> {
        self.items.first()
    }

    pub fn contains_kind(&self, kind: ItemKind) -> bool {
        self.items.iter().any(|item| item.kind == kind)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.is_full()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }
}
