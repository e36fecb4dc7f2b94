//! Handlers for item use, drops and held-item changes.

use ability_core::AbilityError;

use super::{HandlerContext, LifecycleHandler};
use crate::disguise::ActivationOutcome;
use crate::events::LifecycleEvent;

/// Activates the disguise when the special role uses the disguise item.
#[derive(Debug, Clone, Copy)]
pub struct DisguiseHandler;

impl LifecycleHandler for DisguiseHandler {
    fn name(&self) -> &'static str {
        "disguise"
    }

    fn handle(
        &self,
        event: &mut LifecycleEvent,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<(), AbilityError> {
        let LifecycleEvent::UsingItem(args) = event else {
            return Ok(());
        };
        if args.item.kind != ctx.config.disguise_item || !ctx.is_special(args.entity) {
            return Ok(());
        }

        let outcome = ctx.disguise.request_activation(
            args.entity,
            ctx.world,
            ctx.registry,
            ctx.scheduler,
        );
        // A rejected use must not trigger the item's normal effect.
        args.is_allowed = matches!(outcome, ActivationOutcome::Accepted);
        Ok(())
    }
}

/// Re-grants the weapon shortly after the special role drops it.
#[derive(Debug, Clone, Copy)]
pub struct WeaponDropHandler;

impl LifecycleHandler for WeaponDropHandler {
    fn name(&self) -> &'static str {
        "weapon_drop"
    }

    fn handle(
        &self,
        event: &mut LifecycleEvent,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<(), AbilityError> {
        if let LifecycleEvent::DroppingItem(args) = event
            && args.item.kind == ctx.config.weapon
            && ctx.is_special(args.entity)
        {
            ctx.loadout
                .schedule_weapon_regrant(args.entity, ctx.registry, ctx.scheduler);
        }
        Ok(())
    }
}

/// Moves the special role's held item back to the first slot.
#[derive(Debug, Clone, Copy)]
pub struct HeldItemHandler;

impl LifecycleHandler for HeldItemHandler {
    fn name(&self) -> &'static str {
        "held_item"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn handle(
        &self,
        event: &mut LifecycleEvent,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<(), AbilityError> {
        let LifecycleEvent::ChangedItem(args) = event else {
            return Ok(());
        };
        let entity = args.entity;
        if !ctx.is_special(entity) {
            return Ok(());
        }
        let Some(first) = ctx.world.first_item(entity) else {
            return Ok(());
        };

        if args.current.map(|item| item.serial) != Some(first.serial) {
            ctx.loadout
                .schedule_held_item_correction(entity, ctx.registry, ctx.scheduler);
        }
        Ok(())
    }
}
