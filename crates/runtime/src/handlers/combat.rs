//! Handlers for attacks and damage involving the special role.

use ability_core::{AbilityError, SpawnReason, Team, Vitals};
use tracing::info;

use super::{HandlerContext, HandlerCriticality, LifecycleHandler};
use crate::events::LifecycleEvent;
use crate::notice::{Notice, broadcast, hint};

/// Lets the special role attack regardless of the host's default verdict.
#[derive(Debug, Clone, Copy)]
pub struct AttackingHandler;

impl LifecycleHandler for AttackingHandler {
    fn name(&self) -> &'static str {
        "attacking"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn criticality(&self) -> HandlerCriticality {
        HandlerCriticality::Optional
    }

    fn handle(
        &self,
        event: &mut LifecycleEvent,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<(), AbilityError> {
        if let LifecycleEvent::Attacking(args) = event
            && ctx.is_special(args.entity)
        {
            args.is_allowed = true;
        }
        Ok(())
    }
}

/// Converts victims of the special role into the special role instead of letting them die.
///
/// SCP-team victims die normally.
#[derive(Debug, Clone, Copy)]
pub struct InfectionHandler;

impl LifecycleHandler for InfectionHandler {
    fn name(&self) -> &'static str {
        "infection"
    }

    fn handle(
        &self,
        event: &mut LifecycleEvent,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<(), AbilityError> {
        let LifecycleEvent::Dying(args) = event else {
            return Ok(());
        };
        let victim = args.victim;
        let Some(attacker) = args.attacker.filter(|attacker| *attacker != victim) else {
            return Ok(());
        };
        if !ctx.is_special(attacker) {
            return Ok(());
        }
        let Some(role) = ctx.world.role(victim) else {
            return Err(AbilityError::UnknownEntity(victim));
        };
        if role.team() == Team::Scps {
            return Ok(());
        }

        args.is_allowed = false;
        let nickname = ctx.world.nickname(victim).unwrap_or_default();
        broadcast(ctx.world, ctx.config, &Notice::Infected { nickname: &nickname });

        let special = ctx.config.special_role;
        ctx.world.set_role(victim, special, SpawnReason::Revived);
        if ctx.world.role(victim) != Some(special) {
            return Err(AbilityError::StateInconsistency {
                entity: victim,
                detail: "host did not apply the special role",
            });
        }
        ctx.emit(LifecycleEvent::changing_role(victim, special, SpawnReason::Revived));

        ctx.loadout.schedule_equip(victim, ctx.registry, ctx.scheduler);
        ctx.loadout.start_weapon_check(victim, ctx.registry, ctx.scheduler);

        info!(target: "ability::handlers", %victim, %attacker, "victim infected");
        Ok(())
    }
}

/// Turns damage from the special role against the healable role into healing.
#[derive(Debug, Clone, Copy)]
pub struct HealHandler;

impl LifecycleHandler for HealHandler {
    fn name(&self) -> &'static str {
        "heal"
    }

    fn handle(
        &self,
        event: &mut LifecycleEvent,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<(), AbilityError> {
        let LifecycleEvent::Hurting(args) = event else {
            return Ok(());
        };
        let victim = args.victim;
        let Some(attacker) = args.attacker.filter(|attacker| *attacker != victim) else {
            return Ok(());
        };
        if !ctx.is_special(attacker) || ctx.world.role(victim) != Some(ctx.config.healable_role) {
            return Ok(());
        }
        let Some(vitals) = ctx.world.health(victim) else {
            return Err(AbilityError::UnknownEntity(victim));
        };

        args.is_allowed = false;
        let healed: Vitals = vitals.healed(ctx.config.heal_amount, ctx.config.heal_hp_increase);
        ctx.world.set_max_health(victim, healed.maximum);
        ctx.world.set_health(victim, healed.current);

        let role = ctx.config.healable_role;
        broadcast(
            ctx.world,
            ctx.config,
            &Notice::Healed {
                role,
                amount: ctx.config.heal_amount,
                max_increase: ctx.config.heal_hp_increase,
            },
        );
        hint(
            ctx.world,
            attacker,
            &Notice::YouHealed { role },
            ctx.config.display_duration(),
        );

        info!(
            target: "ability::handlers",
            %victim,
            %attacker,
            health = healed.current,
            max_health = healed.maximum,
            "healed instead of damaged"
        );
        Ok(())
    }
}
