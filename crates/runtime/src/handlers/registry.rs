//! Handler registry and dispatch loop.

use std::collections::VecDeque;
use std::sync::Arc;

use ability_core::{AbilityError, ReportedError};
use tracing::{debug, error, trace, warn};

use super::{HandlerContext, HandlerCriticality, LifecycleHandler};
use crate::events::LifecycleEvent;

/// Deepest follow-up chain that is still dispatched.
pub const MAX_CHAIN_DEPTH: usize = 8;

/// Ordered set of lifecycle handlers.
pub struct HandlerRegistry {
    handlers: Arc<[Arc<dyn LifecycleHandler>]>,
}

impl HandlerRegistry {
    /// Creates a registry; handlers are sorted by priority (lower first).
    pub fn new(mut handlers: Vec<Arc<dyn LifecycleHandler>>) -> Self {
        handlers.sort_by_key(|handler| handler.priority());
        Self {
            handlers: handlers.into(),
        }
    }

    /// Creates a registry with one handler per lifecycle hook.
    pub fn default_handlers() -> Self {
        use super::{
            AttackingHandler, DeathHandler, DisguiseHandler, HealHandler, HeldItemHandler,
            InfectionHandler, RoleChangeHandler, WeaponDropHandler,
        };

        Self::new(vec![
            Arc::new(RoleChangeHandler) as Arc<dyn LifecycleHandler>,
            Arc::new(AttackingHandler),
            Arc::new(InfectionHandler),
            Arc::new(HealHandler),
            Arc::new(DisguiseHandler),
            Arc::new(WeaponDropHandler),
            Arc::new(DeathHandler),
            Arc::new(HeldItemHandler),
        ])
    }

    /// Runs `event` through every handler, then drains queued follow-ups.
    ///
    /// Follow-ups are processed breadth first. Handler errors are logged and
    /// never stop the remaining handlers.
    pub fn dispatch(&self, event: &mut LifecycleEvent, ctx: &mut HandlerContext<'_>) {
        self.run_handlers(event, ctx, 0);

        let mut pending: VecDeque<(LifecycleEvent, usize)> = ctx
            .take_follow_ups()
            .into_iter()
            .map(|follow_up| (follow_up, 1))
            .collect();

        while let Some((mut follow_up, depth)) = pending.pop_front() {
            if depth > MAX_CHAIN_DEPTH {
                warn!(
                    target: "ability::handlers",
                    event = follow_up.name(),
                    entity = %follow_up.subject(),
                    depth,
                    "follow-up chain too deep, dropping event"
                );
                continue;
            }
            self.run_handlers(&mut follow_up, ctx, depth);
            pending.extend(
                ctx.take_follow_ups()
                    .into_iter()
                    .map(|next| (next, depth + 1)),
            );
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Handler names and priorities in execution order (for debugging).
    pub fn handlers(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.handlers
            .iter()
            .map(|handler| (handler.name(), handler.priority()))
    }

    fn run_handlers(&self, event: &mut LifecycleEvent, ctx: &mut HandlerContext<'_>, depth: usize) {
        trace!(
            target: "ability::handlers",
            event = event.name(),
            entity = %event.subject(),
            depth,
            "dispatching"
        );
        for handler in self.handlers.iter() {
            if let Err(err) = handler.handle(event, ctx) {
                Self::handle_error(handler.as_ref(), event, &err);
            }
        }
    }

    fn handle_error(handler: &dyn LifecycleHandler, event: &LifecycleEvent, err: &AbilityError) {
        match handler.criticality() {
            HandlerCriticality::Important => error!(
                target: "ability::handlers",
                handler = handler.name(),
                event = event.name(),
                code = err.error_code(),
                error = %err,
                "handler failed, continuing"
            ),
            HandlerCriticality::Optional => debug!(
                target: "ability::handlers",
                handler = handler.name(),
                event = event.name(),
                code = err.error_code(),
                error = %err,
                "optional handler failed"
            ),
        }
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::default_handlers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disguise::DisguiseAbility;
    use crate::loadout::LoadoutEnforcer;
    use crate::registry::EntityRegistry;
    use crate::scheduler::TickScheduler;
    use ability_core::{AbilityConfig, ActorState, EntityId, RoleKind, SpawnReason, WorldState};
    use std::sync::Mutex;

    /// Re-emits a role change for the same entity forever.
    struct Echo {
        seen: Mutex<usize>,
    }

    impl LifecycleHandler for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn handle(
            &self,
            event: &mut LifecycleEvent,
            ctx: &mut HandlerContext<'_>,
        ) -> Result<(), AbilityError> {
            if let LifecycleEvent::ChangingRole(args) = event {
                *self.seen.lock().unwrap() += 1;
                ctx.emit(LifecycleEvent::changing_role(
                    args.entity,
                    args.new_role,
                    args.reason,
                ));
            }
            Ok(())
        }
    }

    struct Failing;

    impl LifecycleHandler for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn priority(&self) -> i32 {
            -1
        }

        fn handle(
            &self,
            event: &mut LifecycleEvent,
            _ctx: &mut HandlerContext<'_>,
        ) -> Result<(), AbilityError> {
            Err(AbilityError::UnknownEntity(event.subject()))
        }
    }

    #[test]
    fn default_handlers_cover_every_hook() {
        let registry = HandlerRegistry::default_handlers();
        assert_eq!(registry.len(), 8);

        let (first, _) = registry.handlers().next().unwrap();
        assert_eq!(first, "role_change");
    }

    #[test]
    fn follow_up_chains_stop_at_max_depth() {
        let config = Arc::new(AbilityConfig::default());
        let loadout = LoadoutEnforcer::new(Arc::clone(&config));
        let disguise = DisguiseAbility::new(Arc::clone(&config));
        let mut world = WorldState::new();
        world
            .spawn(ActorState::new(EntityId(1), "alice", RoleKind::ClassD))
            .unwrap();
        let mut scheduler = TickScheduler::new();
        let mut entities = EntityRegistry::new();
        let mut ctx = HandlerContext::new(
            &mut world,
            &mut scheduler,
            &mut entities,
            &loadout,
            &disguise,
            &config,
        );

        let echo = Arc::new(Echo {
            seen: Mutex::new(0),
        });
        let registry = HandlerRegistry::new(vec![
            Arc::clone(&echo) as Arc<dyn LifecycleHandler>,
            Arc::new(Failing),
        ]);
        assert_eq!(registry.handlers().next().map(|(name, _)| name), Some("failing"));

        let mut event =
            LifecycleEvent::changing_role(EntityId(1), RoleKind::Tutorial, SpawnReason::ForceClass);
        registry.dispatch(&mut event, &mut ctx);

        assert_eq!(*echo.seen.lock().unwrap(), MAX_CHAIN_DEPTH + 1);
    }
}
