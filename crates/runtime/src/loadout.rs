//! Loadout issuing and weapon invariant enforcement for the special role.

use std::ops::ControlFlow;
use std::sync::Arc;

use ability_core::{AbilityConfig, AbilityError, EntityId, Item, Timestamp, World};
use tracing::{debug, trace};

use crate::error::report;
use crate::notice::{Notice, debug_hint};
use crate::registry::EntityRegistry;
use crate::scheduler::{Scheduler, TaskHandle};

/// Issues the special role's items and keeps the weapon in hand.
///
/// Cloning is cheap; task bodies carry their own clone.
#[derive(Clone, Debug)]
pub struct LoadoutEnforcer {
    config: Arc<AbilityConfig>,
}

impl LoadoutEnforcer {
    pub fn new(config: Arc<AbilityConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AbilityConfig {
        &self.config
    }

    /// Returns true while `entity` is alive and in the special role.
    pub fn is_special(&self, world: &dyn World, entity: EntityId) -> bool {
        world.is_alive(entity) && world.role(entity) == Some(self.config.special_role)
    }

    /// Applies the special role's health and shield.
    pub fn apply_role_stats(&self, world: &mut dyn World, entity: EntityId) {
        let health = self.config.special_health;
        world.set_max_health(entity, health);
        world.set_health(entity, health);

        // Shield is replaced, never added to.
        world.set_shield(entity, 0.0);
        world.set_shield(entity, self.config.special_shield);
    }

    /// Clears the inventory and issues the weapon and disguise item, holding the weapon.
    pub fn equip(&self, world: &mut dyn World, entity: EntityId) -> Result<Item, AbilityError> {
        world.clear_inventory(entity);

        let weapon = world.add_item(entity, self.config.weapon);
        if world.add_item(entity, self.config.disguise_item).is_none() {
            report(
                self.config.debug,
                entity,
                &AbilityError::ItemGrantFailure {
                    entity,
                    kind: self.config.disguise_item,
                },
            );
        }

        let weapon = weapon.ok_or(AbilityError::ItemGrantFailure {
            entity,
            kind: self.config.weapon,
        })?;
        world.set_held_item(entity, Some(weapon.serial));

        debug!(target: "ability::loadout", %entity, serial = %weapon.serial, "loadout equipped");
        debug_hint(
            world,
            &self.config,
            entity,
            &Notice::LoadoutEquipped { kind: weapon.kind },
            AbilityConfig::LOADOUT_HINT_DURATION,
        );
        Ok(weapon)
    }

    /// Runs [`equip`](Self::equip) on the next tick, after the role transition has applied.
    pub fn schedule_equip(
        &self,
        entity: EntityId,
        registry: &mut EntityRegistry,
        scheduler: &mut dyn Scheduler,
    ) -> TaskHandle {
        let enforcer = self.clone();
        let handle = scheduler.run_next_tick(
            "equip_loadout",
            Box::new(move |world: &mut dyn World, _now: Timestamp| {
                if let Err(err) = enforcer.equip(world, entity) {
                    report(enforcer.config.debug, entity, &err);
                }
            }),
        );
        registry.track_deferred(entity, scheduler, handle);
        handle
    }

    /// Starts the periodic weapon check for `entity`, replacing any running one.
    pub fn start_weapon_check(
        &self,
        entity: EntityId,
        registry: &mut EntityRegistry,
        scheduler: &mut dyn Scheduler,
    ) -> TaskHandle {
        let enforcer = self.clone();
        registry.start_weapon_check(
            entity,
            scheduler,
            self.config.weapon_check_interval(),
            Box::new(move |world: &mut dyn World, _now: Timestamp| {
                enforcer.enforce_once(world, entity)
            }),
        )
    }

    /// One pass of the weapon check.
    ///
    /// Breaks once the entity has died or left the special role.
    pub fn enforce_once(&self, world: &mut dyn World, entity: EntityId) -> ControlFlow<()> {
        if !self.is_special(world, entity) {
            trace!(target: "ability::loadout", %entity, "weapon check finished");
            return ControlFlow::Break(());
        }

        if !world.has_item_kind(entity, self.config.weapon) {
            match self.grant_weapon(world, entity) {
                Ok(weapon) => debug_hint(
                    world,
                    &self.config,
                    entity,
                    &Notice::WeaponReplenished { kind: weapon.kind },
                    AbilityConfig::DEBUG_HINT_DURATION,
                ),
                Err(err) => report(self.config.debug, entity, &err),
            }
        }

        if world.held_item(entity).is_none()
            && let Some(first) = world.first_item(entity)
        {
            world.set_held_item(entity, Some(first.serial));
            debug_hint(
                world,
                &self.config,
                entity,
                &Notice::ItemAutoEquipped { kind: first.kind },
                AbilityConfig::DEBUG_HINT_DURATION,
            );
        }

        ControlFlow::Continue(())
    }

    /// Grants a new weapon and makes it the held item.
    pub fn grant_weapon(
        &self,
        world: &mut dyn World,
        entity: EntityId,
    ) -> Result<Item, AbilityError> {
        let weapon = world
            .add_item(entity, self.config.weapon)
            .ok_or(AbilityError::ItemGrantFailure {
                entity,
                kind: self.config.weapon,
            })?;
        world.set_held_item(entity, Some(weapon.serial));
        debug!(target: "ability::loadout", %entity, serial = %weapon.serial, "weapon granted");
        Ok(weapon)
    }

    /// Re-grants the weapon shortly after the entity dropped it.
    pub fn schedule_weapon_regrant(
        &self,
        entity: EntityId,
        registry: &mut EntityRegistry,
        scheduler: &mut dyn Scheduler,
    ) -> TaskHandle {
        let enforcer = self.clone();
        let handle = scheduler.run_deferred(
            "regrant_weapon",
            AbilityConfig::CORRECTION_DELAY,
            Box::new(move |world: &mut dyn World, _now: Timestamp| {
                if !enforcer.is_special(world, entity)
                    || world.has_item_kind(entity, enforcer.config.weapon)
                {
                    return;
                }
                match enforcer.grant_weapon(world, entity) {
                    Ok(_) => debug_hint(
                        world,
                        &enforcer.config,
                        entity,
                        &Notice::DroppedWeaponReplenished,
                        AbilityConfig::DEBUG_HINT_DURATION,
                    ),
                    Err(err) => report(enforcer.config.debug, entity, &err),
                }
            }),
        );
        registry.track_deferred(entity, scheduler, handle);
        handle
    }

    /// Moves the held item back to the first inventory slot after a short delay.
    pub fn schedule_held_item_correction(
        &self,
        entity: EntityId,
        registry: &mut EntityRegistry,
        scheduler: &mut dyn Scheduler,
    ) -> TaskHandle {
        let enforcer = self.clone();
        let handle = scheduler.run_deferred(
            "correct_held_item",
            AbilityConfig::CORRECTION_DELAY,
            Box::new(move |world: &mut dyn World, _now: Timestamp| {
                if !enforcer.is_special(world, entity) {
                    return;
                }
                if let Some(first) = world.first_item(entity) {
                    world.set_held_item(entity, Some(first.serial));
                    trace!(
                        target: "ability::loadout",
                        %entity,
                        serial = %first.serial,
                        "held item corrected"
                    );
                }
            }),
        );
        registry.track_deferred(entity, scheduler, handle);
        handle
    }
}
