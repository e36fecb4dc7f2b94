//! Lifecycle handlers.
//!
//! Each handler reacts to one kind of [`LifecycleEvent`] and drives the
//! registry, loadout enforcer and disguise ability in response.
//!
//! # Follow-up events
//!
//! A handler may queue follow-up events through [`HandlerContext::emit`].
//! They are dispatched after the current event has gone through every
//! handler, which mirrors how the host raises a role change while it is still
//! processing the event that caused it:
//! - dying (infection) → changing_role for the converted victim
//! - Chains are cut off at [`MAX_CHAIN_DEPTH`]

mod combat;
mod death;
mod items;
mod registry;
mod role;

pub use combat::{AttackingHandler, HealHandler, InfectionHandler};
pub use death::DeathHandler;
pub use items::{DisguiseHandler, HeldItemHandler, WeaponDropHandler};
pub use registry::{HandlerRegistry, MAX_CHAIN_DEPTH};
pub use role::RoleChangeHandler;

use ability_core::{AbilityConfig, AbilityError, EntityId, World};

use crate::disguise::DisguiseAbility;
use crate::events::LifecycleEvent;
use crate::loadout::LoadoutEnforcer;
use crate::registry::EntityRegistry;
use crate::scheduler::Scheduler;

/// Criticality level for handler errors.
///
/// No handler failure aborts dispatch; the level only decides how loudly it is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerCriticality {
    /// Logged at error level.
    Important,
    /// Logged at debug level.
    Optional,
}

/// Everything a handler may read or mutate while reacting to an event.
pub struct HandlerContext<'a> {
    pub world: &'a mut dyn World,
    pub scheduler: &'a mut dyn Scheduler,
    pub registry: &'a mut EntityRegistry,
    pub loadout: &'a LoadoutEnforcer,
    pub disguise: &'a DisguiseAbility,
    pub config: &'a AbilityConfig,
    follow_ups: Vec<LifecycleEvent>,
}

impl<'a> HandlerContext<'a> {
    pub fn new(
        world: &'a mut dyn World,
        scheduler: &'a mut dyn Scheduler,
        registry: &'a mut EntityRegistry,
        loadout: &'a LoadoutEnforcer,
        disguise: &'a DisguiseAbility,
        config: &'a AbilityConfig,
    ) -> Self {
        Self {
            world,
            scheduler,
            registry,
            loadout,
            disguise,
            config,
            follow_ups: Vec::new(),
        }
    }

    /// Queues an event to be dispatched after the current one.
    pub fn emit(&mut self, event: LifecycleEvent) {
        self.follow_ups.push(event);
    }

    pub fn take_follow_ups(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.follow_ups)
    }

    /// Returns true while `entity` is alive and in the special role.
    pub fn is_special(&self, entity: EntityId) -> bool {
        self.loadout.is_special(&*self.world, entity)
    }
}

/// Reaction to a lifecycle event.
///
/// Handlers ignore events they do not care about and return `Ok(())`.
pub trait LifecycleHandler: Send + Sync {
    fn name(&self) -> &'static str;

    /// Lower values run first.
    fn priority(&self) -> i32 {
        0
    }

    fn criticality(&self) -> HandlerCriticality {
        HandlerCriticality::Important
    }

    fn handle(
        &self,
        event: &mut LifecycleEvent,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<(), AbilityError>;
}
