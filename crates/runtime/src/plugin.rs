//! Plugin facade: enable/disable lifecycle and event dispatch.

use std::sync::Arc;
use std::time::Duration;

use ability_core::{AbilityConfig, EntityId, World};
use tracing::{info, trace};

use crate::disguise::{DisguiseAbility, DisguisePhase};
use crate::error::{PluginError, Result};
use crate::events::LifecycleEvent;
use crate::handlers::{HandlerContext, HandlerRegistry};
use crate::loadout::LoadoutEnforcer;
use crate::registry::EntityRegistry;
use crate::scheduler::{Scheduler, TickScheduler};

/// Owns the ability engine's state and routes host events to it.
///
/// Handlers are attached by [`on_enable`](Self::on_enable) and detached by
/// [`on_disable`](Self::on_disable). While detached, dispatch does nothing
/// and no task is ever scheduled.
pub struct AbilityPlugin<S: Scheduler = TickScheduler> {
    config: Arc<AbilityConfig>,
    scheduler: S,
    registry: EntityRegistry,
    loadout: LoadoutEnforcer,
    disguise: DisguiseAbility,
    handlers: Option<HandlerRegistry>,
}

impl<S: Scheduler> AbilityPlugin<S> {
    /// Validates `config` and builds a detached plugin around `scheduler`.
    pub fn new(config: AbilityConfig, scheduler: S) -> Result<Self> {
        config.validate()?;
        let config = Arc::new(config);

        Ok(Self {
            loadout: LoadoutEnforcer::new(Arc::clone(&config)),
            disguise: DisguiseAbility::new(Arc::clone(&config)),
            config,
            scheduler,
            registry: EntityRegistry::new(),
            handlers: None,
        })
    }

    pub fn name(&self) -> &'static str {
        AbilityConfig::PLUGIN_NAME
    }

    pub fn version(&self) -> (u16, u16, u16) {
        AbilityConfig::PLUGIN_VERSION
    }

    pub fn is_enabled(&self) -> bool {
        self.handlers.is_some()
    }

    /// Attaches the lifecycle handlers.
    pub fn on_enable(&mut self) -> Result<()> {
        if self.handlers.is_some() {
            return Err(PluginError::AlreadyEnabled);
        }
        if !self.config.is_enabled {
            return Err(PluginError::DisabledByConfig);
        }

        let handlers = HandlerRegistry::default_handlers();
        info!(
            target: "ability::plugin",
            plugin = self.name(),
            handlers = handlers.len(),
            "enabled"
        );
        self.handlers = Some(handlers);
        Ok(())
    }

    /// Detaches the lifecycle handlers, then cancels every task and clears all entity state.
    pub fn on_disable(&mut self) -> Result<()> {
        if self.handlers.take().is_none() {
            return Err(PluginError::NotEnabled);
        }

        let entities = self.registry.len();
        let cancelled = self.registry.clear_all(&mut self.scheduler);
        info!(
            target: "ability::plugin",
            plugin = self.name(),
            entities,
            cancelled,
            "disabled"
        );
        Ok(())
    }

    /// Routes a host event through the handlers.
    ///
    /// Returns whether the host should go ahead with the event.
    pub fn dispatch(&mut self, world: &mut dyn World, event: &mut LifecycleEvent) -> bool {
        let Some(handlers) = &self.handlers else {
            trace!(
                target: "ability::plugin",
                event = event.name(),
                "plugin disabled, event ignored"
            );
            return event.is_allowed();
        };

        let mut ctx = HandlerContext::new(
            world,
            &mut self.scheduler,
            &mut self.registry,
            &self.loadout,
            &self.disguise,
            &self.config,
        );
        handlers.dispatch(event, &mut ctx);
        event.is_allowed()
    }

    pub fn config(&self) -> &AbilityConfig {
        &self.config
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Returns true if `entity` has a running weapon check.
    pub fn has_weapon_check(&self, entity: EntityId) -> bool {
        self.registry
            .active_weapon_check(entity, &self.scheduler)
            .is_some()
    }

    pub fn disguise_phase(&self, entity: EntityId) -> DisguisePhase {
        self.disguise.phase(entity, &self.registry, &self.scheduler)
    }
}

impl AbilityPlugin<TickScheduler> {
    pub fn with_tick_scheduler(config: AbilityConfig) -> Result<Self> {
        Self::new(config, TickScheduler::new())
    }

    /// Advances the clock and runs every task that became due.
    pub fn advance(&mut self, dt: Duration, world: &mut dyn World) -> usize {
        self.scheduler.advance(dt, world)
    }
}
