//! Entity-keyed registry of timed-ability state.
//!
//! Each entity that touched the ability engine owns exactly one
//! [`EntityTimedState`] entry holding its task handles, disguise cooldown and
//! saved display identity. Entries are created lazily and removed explicitly
//! on death and teardown; nothing relies on implicit cleanup.

use std::collections::HashMap;

use ability_core::{EntityId, Timestamp};
use tracing::{debug, trace};

use crate::scheduler::{LoopBody, Scheduler, TaskHandle};

/// Per-entity ability bookkeeping.
///
/// # Invariants
///
/// - At most one weapon-check task is registered at any time
/// - At most one disguise effect task is registered at any time
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityTimedState {
    pub weapon_check: Option<TaskHandle>,
    pub disguise_effect: Option<TaskHandle>,
    /// Start of the most recent accepted disguise activation.
    pub disguise_last_used: Option<Timestamp>,
    /// Display identity captured before the first disguise of this role life.
    pub saved_display_info: Option<String>,
    /// One-shot tasks (equip, corrections, re-grants) that may still be pending.
    deferred: Vec<TaskHandle>,
}

impl EntityTimedState {
    fn handles(&self) -> impl Iterator<Item = TaskHandle> + '_ {
        self.weapon_check
            .iter()
            .chain(self.disguise_effect.iter())
            .chain(self.deferred.iter())
            .copied()
    }
}

/// Registry of [`EntityTimedState`] entries keyed by entity.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entries: HashMap<EntityId, EntityTimedState>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `entity`, creating an empty one if none exists.
    pub fn entry(&mut self, entity: EntityId) -> &mut EntityTimedState {
        self.entries.entry(entity).or_insert_with(|| {
            trace!(target: "ability::registry", %entity, "created registry entry");
            EntityTimedState::default()
        })
    }

    pub fn get(&self, entity: EntityId) -> Option<&EntityTimedState> {
        self.entries.get(&entity)
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.entries.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Starts a weapon-check loop for `entity`, replacing any previous one.
    pub fn start_weapon_check(
        &mut self,
        entity: EntityId,
        scheduler: &mut dyn Scheduler,
        interval: std::time::Duration,
        body: LoopBody,
    ) -> TaskHandle {
        self.stop_weapon_check(entity, scheduler);

        let handle = scheduler.run_looping("weapon_check", interval, body);
        self.entry(entity).weapon_check = Some(handle);
        debug!(target: "ability::registry", %entity, %handle, "weapon check started");
        handle
    }

    /// Cancels and unregisters the weapon-check loop. Returns true if one was registered.
    pub fn stop_weapon_check(&mut self, entity: EntityId, scheduler: &mut dyn Scheduler) -> bool {
        let Some(handle) = self
            .entries
            .get_mut(&entity)
            .and_then(|state| state.weapon_check.take())
        else {
            return false;
        };
        scheduler.cancel(handle);
        debug!(target: "ability::registry", %entity, %handle, "weapon check stopped");
        true
    }

    /// Returns the weapon-check handle if that task is still scheduled.
    pub fn active_weapon_check(
        &self,
        entity: EntityId,
        scheduler: &dyn Scheduler,
    ) -> Option<TaskHandle> {
        self.get(entity)?
            .weapon_check
            .filter(|handle| scheduler.is_active(*handle))
    }

    /// Registers the disguise effect task, cancelling a previous one still running.
    pub fn set_disguise_effect(
        &mut self,
        entity: EntityId,
        scheduler: &mut dyn Scheduler,
        handle: TaskHandle,
    ) {
        if let Some(previous) = self.entry(entity).disguise_effect.replace(handle)
            && scheduler.cancel(previous)
        {
            debug!(
                target: "ability::registry",
                %entity,
                %previous,
                "replaced running disguise effect"
            );
        }
    }

    /// Returns the disguise effect handle if that task is still scheduled.
    pub fn active_disguise_effect(
        &self,
        entity: EntityId,
        scheduler: &dyn Scheduler,
    ) -> Option<TaskHandle> {
        self.get(entity)?
            .disguise_effect
            .filter(|handle| scheduler.is_active(*handle))
    }

    /// Tracks a one-shot task so death and teardown can cancel it.
    ///
    /// Handles of tasks that already ran are pruned on every call.
    pub fn track_deferred(
        &mut self,
        entity: EntityId,
        scheduler: &dyn Scheduler,
        handle: TaskHandle,
    ) {
        let state = self.entry(entity);
        state.deferred.retain(|pending| scheduler.is_active(*pending));
        state.deferred.push(handle);
    }

    /// Forgets the cached display identity so the next disguise captures a fresh one.
    pub fn reset_saved_display(&mut self, entity: EntityId) {
        if let Some(state) = self.entries.get_mut(&entity) {
            state.saved_display_info = None;
        }
    }

    /// Cancels every task of `entity` and removes its entry.
    ///
    /// Returns the number of tasks that were still scheduled.
    pub fn forget(&mut self, entity: EntityId, scheduler: &mut dyn Scheduler) -> usize {
        let Some(state) = self.entries.remove(&entity) else {
            return 0;
        };
        let cancelled = state
            .handles()
            .filter(|handle| scheduler.cancel(*handle))
            .count();
        debug!(target: "ability::registry", %entity, cancelled, "registry entry removed");
        cancelled
    }

    /// Cancels every registered task and clears all entries.
    ///
    /// Returns the number of tasks that were still scheduled.
    pub fn clear_all(&mut self, scheduler: &mut dyn Scheduler) -> usize {
        let entities = self.entries.len();
        let cancelled = self
            .entries
            .drain()
            .flat_map(|(_, state)| state.handles().collect::<Vec<_>>())
            .filter(|handle| scheduler.cancel(*handle))
            .count();
        debug!(target: "ability::registry", entities, cancelled, "registry cleared");
        cancelled
    }
}
