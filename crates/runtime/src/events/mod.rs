//! Lifecycle events delivered by the host.
//!
//! Events are dispatched before the host applies them. Cancellable events
//! carry an `is_allowed` flag that handlers may flip; the host reads it back
//! after dispatch to decide whether to go ahead.

use ability_core::{EntityId, Item, RoleKind, SpawnReason};
use strum::IntoStaticStr;

#[derive(Clone, Debug, PartialEq)]
pub struct ChangingRoleArgs {
    pub entity: EntityId,
    pub new_role: RoleKind,
    pub reason: SpawnReason,
    pub is_allowed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AttackingArgs {
    pub entity: EntityId,
    pub target: EntityId,
    pub is_allowed: bool,
}

/// Lethal damage about to be applied to `victim`.
#[derive(Clone, Debug, PartialEq)]
pub struct DyingArgs {
    pub victim: EntityId,
    pub attacker: Option<EntityId>,
    pub is_allowed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HurtingArgs {
    pub victim: EntityId,
    pub attacker: Option<EntityId>,
    pub amount: f32,
    pub is_allowed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UsingItemArgs {
    pub entity: EntityId,
    pub item: Item,
    pub is_allowed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DroppingItemArgs {
    pub entity: EntityId,
    pub item: Item,
    pub is_allowed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DiedArgs {
    pub entity: EntityId,
    pub killer: Option<EntityId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChangedItemArgs {
    pub entity: EntityId,
    pub previous: Option<Item>,
    pub current: Option<Item>,
}

#[derive(Clone, Debug, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum LifecycleEvent {
    ChangingRole(ChangingRoleArgs),
    Attacking(AttackingArgs),
    Dying(DyingArgs),
    Hurting(HurtingArgs),
    UsingItem(UsingItemArgs),
    DroppingItem(DroppingItemArgs),
    Died(DiedArgs),
    ChangedItem(ChangedItemArgs),
}

impl LifecycleEvent {
    pub fn changing_role(entity: EntityId, new_role: RoleKind, reason: SpawnReason) -> Self {
        Self::ChangingRole(ChangingRoleArgs {
            entity,
            new_role,
            reason,
            is_allowed: true,
        })
    }

    /// `is_allowed` is the host's default verdict for this attack.
    pub fn attacking(entity: EntityId, target: EntityId, is_allowed: bool) -> Self {
        Self::Attacking(AttackingArgs {
            entity,
            target,
            is_allowed,
        })
    }

    pub fn dying(victim: EntityId, attacker: Option<EntityId>) -> Self {
        Self::Dying(DyingArgs {
            victim,
            attacker,
            is_allowed: true,
        })
    }

    pub fn hurting(victim: EntityId, attacker: Option<EntityId>, amount: f32) -> Self {
        Self::Hurting(HurtingArgs {
            victim,
            attacker,
            amount,
            is_allowed: true,
        })
    }

    pub fn using_item(entity: EntityId, item: Item) -> Self {
        Self::UsingItem(UsingItemArgs {
            entity,
            item,
            is_allowed: true,
        })
    }

    pub fn dropping_item(entity: EntityId, item: Item) -> Self {
        Self::DroppingItem(DroppingItemArgs {
            entity,
            item,
            is_allowed: true,
        })
    }

    pub fn died(entity: EntityId, killer: Option<EntityId>) -> Self {
        Self::Died(DiedArgs { entity, killer })
    }

    pub fn changed_item(entity: EntityId, previous: Option<Item>, current: Option<Item>) -> Self {
        Self::ChangedItem(ChangedItemArgs {
            entity,
            previous,
            current,
        })
    }

    /// Event name for logs.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// The entity the event is about.
    pub fn subject(&self) -> EntityId {
        match self {
            Self::ChangingRole(args) => args.entity,
            Self::Attacking(args) => args.entity,
            Self::Dying(args) => args.victim,
            Self::Hurting(args) => args.victim,
            Self::UsingItem(args) => args.entity,
            Self::DroppingItem(args) => args.entity,
            Self::Died(args) => args.entity,
            Self::ChangedItem(args) => args.entity,
        }
    }

    /// Whether the host should go ahead. Always true for events that cannot be cancelled.
    pub fn is_allowed(&self) -> bool {
        match self {
            Self::ChangingRole(args) => args.is_allowed,
            Self::Attacking(args) => args.is_allowed,
            Self::Dying(args) => args.is_allowed,
            Self::Hurting(args) => args.is_allowed,
            Self::UsingItem(args) => args.is_allowed,
            Self::DroppingItem(args) => args.is_allowed,
            Self::Died(_) | Self::ChangedItem(_) => true,
        }
    }
}
