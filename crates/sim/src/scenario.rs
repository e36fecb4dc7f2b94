//! Scripted host timeline.
//!
//! The simulation plays the role of a game server: it owns the world, raises
//! lifecycle events through the plugin, applies whatever the plugin allows
//! and advances the scheduler once per frame.

use std::collections::VecDeque;
use std::ops::ControlFlow;
use std::time::Duration;

use ability_core::{ActorState, EntityId, ItemKind, RoleKind, SpawnReason, World, WorldState};
use ability_runtime::{AbilityPlugin, LifecycleEvent};
use anyhow::{Context, Result};
use tracing::{error, info, warn};

/// One host action.
#[derive(Clone, Debug)]
pub enum Step {
    Spawn(ActorState),
    ChangeRole {
        entity: EntityId,
        role: RoleKind,
    },
    LethalHit {
        victim: EntityId,
        attacker: Option<EntityId>,
    },
    Hit {
        victim: EntityId,
        attacker: Option<EntityId>,
        amount: f32,
    },
    UseItem {
        entity: EntityId,
        kind: ItemKind,
    },
    DropItem {
        entity: EntityId,
        kind: ItemKind,
    },
    Hold {
        entity: EntityId,
        kind: ItemKind,
    },
}

/// Steps ordered by simulated time.
#[derive(Clone, Debug, Default)]
pub struct Scenario {
    steps: Vec<(Duration, Step)>,
}

impl Scenario {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, secs: f32, step: Step) -> Self {
        self.steps.push((Duration::from_secs_f32(secs), step));
        self
    }

    /// Infection, healing, disguise and item corrections in one round.
    pub fn demo() -> Self {
        let zed = EntityId(1);
        let bob = EntityId(2);
        let doctor = EntityId(3);
        let ann = EntityId(4);
        let peanut = EntityId(5);
        let coin = |entity| Step::UseItem {
            entity,
            kind: ItemKind::Coin,
        };

        Self::new()
            .at(
                0.0,
                Step::Spawn(
                    ActorState::new(zed, "zed", RoleKind::ClassD).with_custom_info("D-9341"),
                ),
            )
            .at(0.0, Step::Spawn(ActorState::new(bob, "bob", RoleKind::Scientist)))
            .at(0.0, Step::Spawn(ActorState::new(doctor, "doctor", RoleKind::Scp049)))
            .at(0.0, Step::Spawn(ActorState::new(ann, "ann", RoleKind::FacilityGuard)))
            .at(0.0, Step::Spawn(ActorState::new(peanut, "peanut", RoleKind::Scp173)))
            .at(
                1.0,
                Step::ChangeRole {
                    entity: zed,
                    role: RoleKind::Scp0492,
                },
            )
            .at(
                2.0,
                Step::LethalHit {
                    victim: bob,
                    attacker: Some(zed),
                },
            )
            .at(
                3.0,
                Step::Hit {
                    victim: doctor,
                    attacker: Some(zed),
                    amount: 20.0,
                },
            )
            .at(4.0, coin(zed))
            .at(14.0, coin(zed))
            .at(
                15.0,
                Step::DropItem {
                    entity: bob,
                    kind: ItemKind::GunFSP9,
                },
            )
            .at(
                16.0,
                Step::Hold {
                    entity: bob,
                    kind: ItemKind::Coin,
                },
            )
            .at(
                20.0,
                Step::LethalHit {
                    victim: peanut,
                    attacker: Some(zed),
                },
            )
            .at(64.0, coin(zed))
            .at(
                70.0,
                Step::LethalHit {
                    victim: zed,
                    attacker: Some(ann),
                },
            )
    }
}

/// Runs a [`Scenario`] against an enabled plugin.
pub struct Simulation {
    world: WorldState,
    plugin: AbilityPlugin,
    pending: VecDeque<(Duration, Step)>,
    elapsed: Duration,
    duration: Duration,
    speed: f32,
}

impl Simulation {
    pub fn new(plugin: AbilityPlugin, scenario: Scenario, duration: Duration, speed: f32) -> Self {
        let mut steps = scenario.steps;
        steps.sort_by_key(|(at, _)| *at);
        Self {
            world: WorldState::new(),
            plugin,
            pending: steps.into(),
            elapsed: Duration::ZERO,
            duration,
            speed,
        }
    }

    /// Advances one frame of `dt` real time.
    pub fn tick(&mut self, dt: Duration) -> ControlFlow<()> {
        let dt = dt.mul_f32(self.speed);
        self.elapsed += dt;
        self.plugin.advance(dt, &mut self.world);

        while let Some((at, _)) = self.pending.front()
            && *at <= self.elapsed
        {
            let Some((_, step)) = self.pending.pop_front() else {
                break;
            };
            if let Err(err) = self.apply(step) {
                error!(target: "ability::sim", error = %err, "step failed");
            }
        }
        self.flush_notifications();

        if self.elapsed >= self.duration {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    /// Disables the plugin and logs the final world state.
    pub fn finish(mut self) -> Result<WorldState> {
        self.plugin.on_disable()?;
        self.flush_notifications();

        for entity in self.world.entities() {
            info!(
                target: "ability::sim",
                %entity,
                nickname = self.world.nickname(entity).unwrap_or_default(),
                role = ?self.world.role(entity),
                items = ?self.world.items(entity).iter().map(|item| item.kind).collect::<Vec<_>>(),
                info = self.world.custom_info(entity).unwrap_or_default(),
                "final state"
            );
        }
        Ok(self.world)
    }

    fn apply(&mut self, step: Step) -> Result<()> {
        info!(target: "ability::sim", at = ?self.elapsed, ?step, "step");
        match step {
            Step::Spawn(actor) => {
                self.world.spawn(actor)?;
            }
            Step::ChangeRole { entity, role } => {
                self.change_role(entity, role, SpawnReason::ForceClass)
            }
            Step::LethalHit { victim, attacker } => {
                let mut dying = LifecycleEvent::dying(victim, attacker);
                if !self.plugin.dispatch(&mut self.world, &mut dying) {
                    info!(target: "ability::sim", %victim, "death prevented");
                    return Ok(());
                }
                self.world.kill(victim)?;
                let mut died = LifecycleEvent::died(victim, attacker);
                self.plugin.dispatch(&mut self.world, &mut died);
            }
            Step::Hit {
                victim,
                attacker,
                amount,
            } => {
                let mut hurting = LifecycleEvent::hurting(victim, attacker, amount);
                if self.plugin.dispatch(&mut self.world, &mut hurting) {
                    let vitals = self
                        .world
                        .health(victim)
                        .with_context(|| format!("entity {victim} has no health"))?;
                    self.world.set_health(victim, vitals.current - amount);
                }
            }
            Step::UseItem { entity, kind } => {
                let Some(item) = self.find_item(entity, kind) else {
                    return Ok(());
                };
                let mut using = LifecycleEvent::using_item(entity, item);
                let allowed = self.plugin.dispatch(&mut self.world, &mut using);
                info!(target: "ability::sim", %entity, %kind, allowed, "item used");
            }
            Step::DropItem { entity, kind } => {
                let Some(item) = self.find_item(entity, kind) else {
                    return Ok(());
                };
                let mut dropping = LifecycleEvent::dropping_item(entity, item);
                if self.plugin.dispatch(&mut self.world, &mut dropping) {
                    self.world.drop_item(entity, item.serial)?;
                }
            }
            Step::Hold { entity, kind } => {
                let Some(item) = self.find_item(entity, kind) else {
                    return Ok(());
                };
                let previous = self.world.held_item(entity);
                self.world.set_held_item(entity, Some(item.serial));
                let mut changed = LifecycleEvent::changed_item(entity, previous, Some(item));
                self.plugin.dispatch(&mut self.world, &mut changed);
            }
        }
        Ok(())
    }

    fn change_role(&mut self, entity: EntityId, role: RoleKind, reason: SpawnReason) {
        let mut event = LifecycleEvent::changing_role(entity, role, reason);
        if self.plugin.dispatch(&mut self.world, &mut event) {
            self.world.set_role(entity, role, reason);
        }
    }

    fn find_item(&self, entity: EntityId, kind: ItemKind) -> Option<ability_core::Item> {
        let item = self
            .world
            .items(entity)
            .into_iter()
            .find(|item| item.kind == kind);
        if item.is_none() {
            warn!(
                target: "ability::sim",
                %entity,
                %kind,
                "entity does not carry item, step skipped"
            );
        }
        item
    }

    fn flush_notifications(&mut self) {
        for note in self.world.take_notifications() {
            info!(
                target: "ability::sim",
                to = %note.recipient,
                secs = note.duration.as_secs_f32(),
                "{}",
                note.text.trim_start()
            );
        }
    }
}
