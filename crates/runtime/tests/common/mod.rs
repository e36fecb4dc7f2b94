//! Minimal host that raises lifecycle events the way a game server would.
#![allow(dead_code)]

use std::time::Duration;

use ability_core::{
    AbilityConfig, ActorState, EntityId, Item, ItemKind, RoleKind, SpawnReason, World, WorldState,
};
use ability_runtime::{AbilityPlugin, LifecycleEvent};

pub const FRAME: Duration = Duration::from_millis(50);

pub struct Host {
    pub world: WorldState,
    pub plugin: AbilityPlugin,
}

impl Host {
    pub fn new() -> Self {
        Self::with_config(AbilityConfig::default())
    }

    pub fn with_config(config: AbilityConfig) -> Self {
        let mut plugin = AbilityPlugin::with_tick_scheduler(config).unwrap();
        plugin.on_enable().unwrap();
        Self {
            world: WorldState::new(),
            plugin,
        }
    }

    pub fn spawn(&mut self, actor: ActorState) -> EntityId {
        self.world.spawn(actor).unwrap()
    }

    /// Spawns a human and turns it into the special role through the event path.
    pub fn spawn_special(&mut self, id: u32, nickname: &str) -> EntityId {
        let entity = self.spawn(ActorState::new(EntityId(id), nickname, RoleKind::ClassD));
        self.change_role(entity, RoleKind::Scp0492);
        self.run_for(FRAME);
        entity
    }

    pub fn change_role(&mut self, entity: EntityId, role: RoleKind) {
        let mut event = LifecycleEvent::changing_role(entity, role, SpawnReason::ForceClass);
        if self.plugin.dispatch(&mut self.world, &mut event) {
            self.world.set_role(entity, role, SpawnReason::ForceClass);
        }
    }

    /// Raises a lethal hit. Returns true if the victim actually died.
    pub fn kill(&mut self, victim: EntityId, attacker: Option<EntityId>) -> bool {
        let mut event = LifecycleEvent::dying(victim, attacker);
        if !self.plugin.dispatch(&mut self.world, &mut event) {
            return false;
        }
        self.world.kill(victim).unwrap();
        let mut died = LifecycleEvent::died(victim, attacker);
        self.plugin.dispatch(&mut self.world, &mut died);
        true
    }

    /// Raises a non-lethal hit. Returns true if the damage was applied.
    pub fn hurt(&mut self, victim: EntityId, attacker: Option<EntityId>, amount: f32) -> bool {
        let mut event = LifecycleEvent::hurting(victim, attacker, amount);
        if !self.plugin.dispatch(&mut self.world, &mut event) {
            return false;
        }
        let current = self.world.health(victim).unwrap().current;
        self.world.set_health(victim, current - amount);
        true
    }

    pub fn use_item(&mut self, entity: EntityId, kind: ItemKind) -> bool {
        let item = self.item(entity, kind);
        let mut event = LifecycleEvent::using_item(entity, item);
        self.plugin.dispatch(&mut self.world, &mut event)
    }

    pub fn drop_item(&mut self, entity: EntityId, kind: ItemKind) -> bool {
        let item = self.item(entity, kind);
        let mut event = LifecycleEvent::dropping_item(entity, item);
        if !self.plugin.dispatch(&mut self.world, &mut event) {
            return false;
        }
        self.world.drop_item(entity, item.serial).unwrap();
        true
    }

    pub fn hold(&mut self, entity: EntityId, kind: ItemKind) {
        let previous = self.world.held_item(entity);
        let item = self.item(entity, kind);
        self.world.set_held_item(entity, Some(item.serial));
        let mut event = LifecycleEvent::changed_item(entity, previous, Some(item));
        self.plugin.dispatch(&mut self.world, &mut event);
    }

    pub fn run_for(&mut self, duration: Duration) {
        let frames = duration.as_millis() / FRAME.as_millis();
        for _ in 0..frames {
            self.plugin.advance(FRAME, &mut self.world);
        }
    }

    pub fn item(&self, entity: EntityId, kind: ItemKind) -> Item {
        self.world
            .items(entity)
            .into_iter()
            .find(|item| item.kind == kind)
            .unwrap()
    }

    pub fn item_kinds(&self, entity: EntityId) -> Vec<ItemKind> {
        self.world.items(entity).iter().map(|item| item.kind).collect()
    }

    pub fn saw(&self, entity: EntityId, text: &str) -> bool {
        self.world
            .notifications_for(entity)
            .any(|note| note.text.contains(text))
    }
}
