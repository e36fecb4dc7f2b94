//! Cooldown-gated disguise ability.
//!
//! ```text
//! Idle --use item--> cooldown check --rejected--> Idle
//!                         |
//!                      accepted
//!                         v
//!                      Active --duration elapsed--> restore --> Idle
//!                         |
//!                       death --> Idle (nothing restored)
//! ```
//!
//! The cooldown starts at activation, so a second effect can only overlap the
//! first when the cooldown is shorter than the duration. In that case the new
//! effect replaces the running one.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use ability_core::{AbilityConfig, AbilityError, EntityId, Timestamp, World};
use tracing::{debug, info};

use crate::error::report;
use crate::notice::{Notice, broadcast, debug_hint, hint};
use crate::registry::EntityRegistry;
use crate::scheduler::{Scheduler, TaskHandle};

/// Result of a disguise activation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationOutcome {
    Accepted,
    /// Still cooling down; `remaining_secs` is rounded down.
    Rejected { remaining_secs: u64 },
}

impl ActivationOutcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisguisePhase {
    Idle,
    Active,
}

#[derive(Clone, Debug)]
pub struct DisguiseAbility {
    config: Arc<AbilityConfig>,
}

impl DisguiseAbility {
    pub fn new(config: Arc<AbilityConfig>) -> Self {
        Self { config }
    }

    /// Checks the cooldown without recording anything.
    pub fn check_cooldown(
        &self,
        registry: &EntityRegistry,
        entity: EntityId,
        now: Timestamp,
    ) -> ActivationOutcome {
        let Some(last_used) = registry.get(entity).and_then(|state| state.disguise_last_used) else {
            return ActivationOutcome::Accepted;
        };

        let cooldown = self.config.disguise_cooldown();
        let elapsed = now.since(last_used);
        if elapsed < cooldown {
            ActivationOutcome::Rejected {
                remaining_secs: (cooldown - elapsed).as_secs(),
            }
        } else {
            ActivationOutcome::Accepted
        }
    }

    /// Handles a use of the disguise item.
    ///
    /// On acceptance the activation time is recorded before the effect starts.
    /// On rejection the entity is told how long it still has to wait.
    pub fn request_activation(
        &self,
        entity: EntityId,
        world: &mut dyn World,
        registry: &mut EntityRegistry,
        scheduler: &mut dyn Scheduler,
    ) -> ActivationOutcome {
        let now = scheduler.now();
        let outcome = self.check_cooldown(registry, entity, now);

        match outcome {
            ActivationOutcome::Rejected { remaining_secs } => {
                debug!(target: "ability::disguise", %entity, remaining_secs, "activation rejected");
                hint(
                    world,
                    entity,
                    &Notice::CooldownRemaining {
                        secs: remaining_secs,
                    },
                    AbilityConfig::STATUS_HINT_DURATION,
                );
            }
            ActivationOutcome::Accepted => {
                registry.entry(entity).disguise_last_used = Some(now);
                self.activate(entity, world, registry, scheduler);
            }
        }
        outcome
    }

    /// Applies the disguise and starts the effect task.
    pub fn activate(
        &self,
        entity: EntityId,
        world: &mut dyn World,
        registry: &mut EntityRegistry,
        scheduler: &mut dyn Scheduler,
    ) -> TaskHandle {
        let saved = registry
            .entry(entity)
            .saved_display_info
            .get_or_insert_with(|| world.custom_info(entity).unwrap_or_default())
            .clone();

        let label = self.config.disguise_label.as_str();
        world.set_custom_info(entity, label.to_owned());
        hint(
            world,
            entity,
            &Notice::DisguiseStarted { label },
            self.config.display_duration(),
        );

        let nickname = world.nickname(entity).unwrap_or_default();
        broadcast(
            world,
            &self.config,
            &Notice::Disguised {
                role: self.config.special_role,
                nickname: &nickname,
            },
        );

        let ability = self.clone();
        let started = scheduler.now();
        let handle = scheduler.run_looping(
            "disguise_effect",
            Duration::ZERO,
            Box::new(move |world: &mut dyn World, now: Timestamp| {
                ability.tick_effect(world, entity, started, now, &saved)
            }),
        );
        registry.set_disguise_effect(entity, scheduler, handle);

        info!(target: "ability::disguise", %entity, %handle, "disguise activated");
        handle
    }

    /// One step of the active effect.
    fn tick_effect(
        &self,
        world: &mut dyn World,
        entity: EntityId,
        started: Timestamp,
        now: Timestamp,
        saved: &str,
    ) -> ControlFlow<()> {
        if !world.is_alive(entity) {
            debug!(target: "ability::disguise", %entity, "disguise ended by death");
            return ControlFlow::Break(());
        }
        if now.since(started) < self.config.disguise_duration() {
            return ControlFlow::Continue(());
        }

        self.restore(world, entity, saved);
        ControlFlow::Break(())
    }

    /// Restores the display identity and hands the disguise item back if it is gone.
    pub fn restore(&self, world: &mut dyn World, entity: EntityId, saved: &str) {
        world.set_custom_info(entity, saved.to_owned());
        hint(
            world,
            entity,
            &Notice::DisguiseEnded,
            AbilityConfig::STATUS_HINT_DURATION,
        );
        info!(target: "ability::disguise", %entity, "disguise ended");

        if world.has_item_kind(entity, self.config.disguise_item) {
            return;
        }
        match world.add_item(entity, self.config.disguise_item) {
            Some(_) => debug_hint(
                world,
                &self.config,
                entity,
                &Notice::DisguiseItemRegained,
                AbilityConfig::DEBUG_HINT_DURATION,
            ),
            None => report(
                self.config.debug,
                entity,
                &AbilityError::ItemGrantFailure {
                    entity,
                    kind: self.config.disguise_item,
                },
            ),
        }
    }

    pub fn phase(
        &self,
        entity: EntityId,
        registry: &EntityRegistry,
        scheduler: &dyn Scheduler,
    ) -> DisguisePhase {
        match registry.active_disguise_effect(entity, scheduler) {
            Some(_) => DisguisePhase::Active,
            None => DisguisePhase::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::TickScheduler;
    use ability_core::{ActorState, ItemKind, RoleKind, WorldState};

    const FRAME: Duration = Duration::from_millis(100);

    struct Harness {
        world: WorldState,
        scheduler: TickScheduler,
        registry: EntityRegistry,
        ability: DisguiseAbility,
        entity: EntityId,
    }

    impl Harness {
        fn new(config: AbilityConfig) -> Self {
            let mut world = WorldState::new();
            let entity = world
                .spawn(
                    ActorState::new(EntityId(1), "zed", RoleKind::Scp0492)
                        .with_custom_info("Janitor"),
                )
                .unwrap();
            world
                .spawn(ActorState::new(EntityId(2), "bob", RoleKind::ClassD))
                .unwrap();
            Self {
                world,
                scheduler: TickScheduler::new(),
                registry: EntityRegistry::new(),
                ability: DisguiseAbility::new(Arc::new(config)),
                entity,
            }
        }

        fn request(&mut self) -> ActivationOutcome {
            self.ability.request_activation(
                self.entity,
                &mut self.world,
                &mut self.registry,
                &mut self.scheduler,
            )
        }

        fn run_for(&mut self, duration: Duration) {
            let frames = duration.as_millis() / FRAME.as_millis();
            for _ in 0..frames {
                self.scheduler.advance(FRAME, &mut self.world);
            }
        }

        fn phase(&self) -> DisguisePhase {
            self.ability.phase(self.entity, &self.registry, &self.scheduler)
        }
    }

    #[test]
    fn first_activation_is_accepted_and_broadcast() {
        let mut h = Harness::new(AbilityConfig::default());

        assert_eq!(h.request(), ActivationOutcome::Accepted);
        assert_eq!(h.world.custom_info(h.entity).as_deref(), Some("Class-D Personnel"));
        assert_eq!(h.phase(), DisguisePhase::Active);
        assert!(
            h.world
                .notifications_for(EntityId(2))
                .any(|note| note.text.ends_with("Scp0492 zed disguised as human!"))
        );
    }

    #[test]
    fn remaining_cooldown_decreases_and_rounds_down() {
        let mut h = Harness::new(AbilityConfig::default());
        h.request();

        h.run_for(Duration::from_secs(10));
        assert_eq!(h.request(), ActivationOutcome::Rejected { remaining_secs: 50 });

        h.run_for(Duration::from_millis(10_500));
        assert_eq!(h.request(), ActivationOutcome::Rejected { remaining_secs: 39 });

        h.run_for(Duration::from_secs(40));
        assert!(h.request().is_accepted());
    }

    #[test]
    fn rejection_does_not_move_the_cooldown() {
        let mut h = Harness::new(AbilityConfig::default());
        h.request();
        h.run_for(Duration::from_secs(30));
        h.request();

        assert_eq!(
            h.registry.get(h.entity).unwrap().disguise_last_used,
            Some(Timestamp::ZERO)
        );
    }

    #[test]
    fn expiry_restores_identity_and_regrants_item() {
        let mut h = Harness::new(AbilityConfig::default());
        h.request();

        h.run_for(Duration::from_secs(29));
        assert_eq!(h.phase(), DisguisePhase::Active);

        h.run_for(Duration::from_secs(1));
        assert_eq!(h.phase(), DisguisePhase::Idle);
        assert_eq!(h.world.custom_info(h.entity).as_deref(), Some("Janitor"));
        assert!(h.world.has_item_kind(h.entity, ItemKind::Coin));
        assert!(
            h.world
                .notifications_for(h.entity)
                .any(|note| note.text == "Your disguise has ended!")
        );
    }

    #[test]
    fn death_skips_restoration() {
        let mut h = Harness::new(AbilityConfig::default());
        h.request();
        h.run_for(Duration::from_secs(5));

        h.world.kill(h.entity).unwrap();
        h.run_for(Duration::from_secs(30));

        assert_eq!(h.phase(), DisguisePhase::Idle);
        assert_eq!(h.world.custom_info(h.entity).as_deref(), Some("Class-D Personnel"));
        assert!(!h.world.has_item_kind(h.entity, ItemKind::Coin));
    }

    #[test]
    fn saved_identity_survives_repeated_disguises() {
        let config = AbilityConfig {
            disguise_cooldown_secs: 1.0,
            disguise_duration_secs: 5.0,
            ..AbilityConfig::default()
        };
        let mut h = Harness::new(config);

        h.request();
        h.run_for(Duration::from_secs(2));
        assert!(h.request().is_accepted());
        assert_eq!(h.scheduler.active_count(), 1);

        h.run_for(Duration::from_secs(5));
        assert_eq!(h.world.custom_info(h.entity).as_deref(), Some("Janitor"));
    }
}
