//! Entity state and the in-memory world.
//!
//! [`WorldState`] is a self-contained implementation of the [`World`]
//! collaborator. Hosts with their own entity storage implement [`World`]
//! directly; tests and the simulation binary use this one.
pub mod error;
pub mod types;

use std::collections::BTreeMap;
use std::time::Duration;

pub use error::WorldError;
pub use types::{
    ActorState, EntityId, INVENTORY_SLOTS, InventoryState, Item, ItemKind, ItemSerial, RoleKind,
    SpawnReason, Team, Timestamp, Vitals,
};

use crate::world::World;

/// Hint delivered to a single entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub recipient: EntityId,
    pub text: String,
    pub duration: Duration,
}

/// In-memory entity store.
#[derive(Clone, Debug, Default)]
pub struct WorldState {
    actors: BTreeMap<EntityId, ActorState>,
    /// Next item serial to hand out. Serials are never reused.
    next_serial: u32,
    notifications: Vec<Notification>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity. Ids must be unique.
    pub fn spawn(&mut self, actor: ActorState) -> Result<EntityId, WorldError> {
        let id = actor.id;
        if self.actors.contains_key(&id) {
            return Err(WorldError::DuplicateEntity(id));
        }
        self.actors.insert(id, actor);
        Ok(id)
    }

    /// Removes an item from the inventory the way a voluntary drop would.
    pub fn drop_item(&mut self, id: EntityId, serial: ItemSerial) -> Result<Item, WorldError> {
        let actor = self
            .actors
            .get_mut(&id)
            .ok_or(WorldError::UnknownEntity(id))?;
        let item = actor
            .inventory
            .remove(serial)
            .ok_or(WorldError::UnknownItem { entity: id, serial })?;
        if actor.held == Some(serial) {
            actor.held = None;
        }
        Ok(item)
    }

    /// Kills the entity: it becomes a spectator and loses its inventory.
    pub fn kill(&mut self, id: EntityId) -> Result<(), WorldError> {
        if !self.actors.contains_key(&id) {
            return Err(WorldError::UnknownEntity(id));
        }
        self.set_role(id, RoleKind::Spectator, SpawnReason::Died);
        Ok(())
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn notifications_for(&self, id: EntityId) -> impl Iterator<Item = &Notification> {
        self.notifications
            .iter()
            .filter(move |note| note.recipient == id)
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn allocate_serial(&mut self) -> Option<ItemSerial> {
        let serial = ItemSerial(self.next_serial);
        self.next_serial = self.next_serial.checked_add(1)?;
        Some(serial)
    }
}

impl World for WorldState {
    fn entities(&self) -> Vec<EntityId> {
        self.actors.keys().copied().collect()
    }

    fn contains(&self, id: EntityId) -> bool {
        self.actors.contains_key(&id)
    }

    fn is_alive(&self, id: EntityId) -> bool {
        self.actors.get(&id).is_some_and(|actor| actor.alive)
    }

    fn nickname(&self, id: EntityId) -> Option<String> {
        self.actors.get(&id).map(|actor| actor.nickname.clone())
    }

    fn role(&self, id: EntityId) -> Option<RoleKind> {
        self.actors.get(&id).map(|actor| actor.role)
    }

    fn set_role(&mut self, id: EntityId, role: RoleKind, _reason: SpawnReason) {
        let Some(actor) = self.actors.get_mut(&id) else {
            return;
        };
        actor.role = role;
        actor.alive = role.is_alive();
        if !actor.alive {
            actor.inventory.clear();
            actor.held = None;
            actor.shield = 0.0;
        }
    }

    fn health(&self, id: EntityId) -> Option<Vitals> {
        self.actors.get(&id).map(|actor| actor.vitals)
    }

    fn set_health(&mut self, id: EntityId, current: f32) {
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.vitals.current = current;
        }
    }

    fn set_max_health(&mut self, id: EntityId, maximum: f32) {
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.vitals.maximum = maximum;
        }
    }

    fn shield(&self, id: EntityId) -> Option<f32> {
        self.actors.get(&id).map(|actor| actor.shield)
    }

    fn set_shield(&mut self, id: EntityId, value: f32) {
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.shield = value;
        }
    }

    fn items(&self, id: EntityId) -> Vec<Item> {
        self.actors
            .get(&id)
            .map(|actor| actor.inventory.iter().copied().collect())
            .unwrap_or_default()
    }

    fn held_item(&self, id: EntityId) -> Option<Item> {
        self.actors.get(&id).and_then(ActorState::held_item)
    }

    fn set_held_item(&mut self, id: EntityId, serial: Option<ItemSerial>) {
        let Some(actor) = self.actors.get_mut(&id) else {
            return;
        };
        match serial {
            Some(serial) if actor.inventory.get(serial).is_none() => {}
            other => actor.held = other,
        }
    }

    fn add_item(&mut self, id: EntityId, kind: ItemKind) -> Option<Item> {
        let actor = self.actors.get(&id)?;
        if !actor.alive || actor.inventory.is_full() {
            return None;
        }
        let item = Item::new(self.allocate_serial()?, kind);
        let actor = self.actors.get_mut(&id)?;
        actor.inventory.push(item).ok()?;
        Some(item)
    }

    fn clear_inventory(&mut self, id: EntityId) {
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.inventory.clear();
            actor.held = None;
        }
    }

    fn custom_info(&self, id: EntityId) -> Option<String> {
        self.actors.get(&id).map(|actor| actor.custom_info.clone())
    }

    fn set_custom_info(&mut self, id: EntityId, info: String) {
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.custom_info = info;
        }
    }

    fn notify(&mut self, id: EntityId, text: &str, duration: Duration) {
        if !self.actors.contains_key(&id) {
            return;
        }
        self.notifications.push(Notification {
            recipient: id,
            text: text.to_owned(),
            duration,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with(role: RoleKind) -> (WorldState, EntityId) {
        let mut world = WorldState::new();
        let id = world
            .spawn(ActorState::new(EntityId(1), "alice", role))
            .unwrap();
        (world, id)
    }

    #[test]
    fn spawn_rejects_duplicate_ids() {
        let (mut world, id) = world_with(RoleKind::ClassD);
        assert_eq!(
            world.spawn(ActorState::new(id, "bob", RoleKind::Scientist)),
            Err(WorldError::DuplicateEntity(id))
        );
    }

    #[test]
    fn add_item_fails_for_dead_or_full() {
        let (mut world, id) = world_with(RoleKind::ClassD);
        for _ in 0..INVENTORY_SLOTS {
            assert!(world.add_item(id, ItemKind::Coin).is_some());
        }
        assert!(world.add_item(id, ItemKind::Coin).is_none());

        world.kill(id).unwrap();
        assert!(world.items(id).is_empty());
        assert!(world.add_item(id, ItemKind::Coin).is_none());
        assert!(world.add_item(EntityId(42), ItemKind::Coin).is_none());
    }

    #[test]
    fn held_item_must_be_in_inventory() {
        let (mut world, id) = world_with(RoleKind::ClassD);
        let coin = world.add_item(id, ItemKind::Coin).unwrap();

        world.set_held_item(id, Some(ItemSerial(999)));
        assert_eq!(world.held_item(id), None);

        world.set_held_item(id, Some(coin.serial));
        assert_eq!(world.held_item(id), Some(coin));

        world.drop_item(id, coin.serial).unwrap();
        assert_eq!(world.held_item(id), None);
    }

    #[test]
    fn serials_are_unique_across_entities() {
        let (mut world, first) = world_with(RoleKind::ClassD);
        let second = world
            .spawn(ActorState::new(EntityId(2), "bob", RoleKind::Scientist))
            .unwrap();

        let a = world.add_item(first, ItemKind::Coin).unwrap();
        let b = world.add_item(second, ItemKind::Coin).unwrap();
        assert_ne!(a.serial, b.serial);
    }

    #[test]
    fn notify_records_hint_for_known_entities() {
        let (mut world, id) = world_with(RoleKind::ClassD);
        world.notify(id, "hello", Duration::from_secs(3));
        world.notify(EntityId(77), "nobody", Duration::from_secs(3));

        let notes: Vec<_> = world.notifications_for(id).collect();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].text, "hello");
        assert_eq!(world.notifications().len(), 1);
    }
}
