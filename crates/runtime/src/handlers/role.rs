//! Handler for role changes.

use ability_core::AbilityError;
use tracing::{debug, info};

use super::{HandlerContext, LifecycleHandler};
use crate::events::LifecycleEvent;

/// Sets up an entity entering the special role and stops enforcement when it leaves.
///
/// The event fires before the host applies the role, so equipping is deferred
/// to the next tick.
#[derive(Debug, Clone, Copy)]
pub struct RoleChangeHandler;

impl LifecycleHandler for RoleChangeHandler {
    fn name(&self) -> &'static str {
        "role_change"
    }

    fn priority(&self) -> i32 {
        -10
    }

    fn handle(
        &self,
        event: &mut LifecycleEvent,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<(), AbilityError> {
        let LifecycleEvent::ChangingRole(args) = event else {
            return Ok(());
        };
        if !args.is_allowed {
            return Ok(());
        }
        let entity = args.entity;

        if args.new_role != ctx.config.special_role {
            if ctx.registry.stop_weapon_check(entity, ctx.scheduler) {
                debug!(
                    target: "ability::handlers",
                    %entity,
                    role = %args.new_role,
                    "left special role"
                );
            }
            return Ok(());
        }

        ctx.loadout.apply_role_stats(ctx.world, entity);
        ctx.registry.reset_saved_display(entity);
        ctx.loadout.schedule_equip(entity, ctx.registry, ctx.scheduler);
        ctx.loadout.start_weapon_check(entity, ctx.registry, ctx.scheduler);

        info!(target: "ability::handlers", %entity, reason = %args.reason, "entered special role");
        Ok(())
    }
}
