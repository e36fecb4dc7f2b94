//! Handler for entity death.

use ability_core::AbilityError;
use tracing::debug;

use super::{HandlerContext, LifecycleHandler};
use crate::events::LifecycleEvent;

/// Drops every piece of timed state the dead entity owned.
///
/// Removing the registry entry cancels the weapon check, a running disguise
/// effect and pending one-shot tasks, and resets the disguise cooldown.
#[derive(Debug, Clone, Copy)]
pub struct DeathHandler;

impl LifecycleHandler for DeathHandler {
    fn name(&self) -> &'static str {
        "death"
    }

    fn handle(
        &self,
        event: &mut LifecycleEvent,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<(), AbilityError> {
        let LifecycleEvent::Died(args) = event else {
            return Ok(());
        };

        let cancelled = ctx.registry.forget(args.entity, ctx.scheduler);
        if cancelled > 0 {
            debug!(
                target: "ability::handlers",
                entity = %args.entity,
                cancelled,
                "cleared timed state of dead entity"
            );
        }
        Ok(())
    }
}
