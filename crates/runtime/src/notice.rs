//! Player-facing notices.
//!
//! Notices carry plain text only; colouring and layout beyond the configured
//! hint position belong to the host.

use std::fmt;
use std::time::Duration;

use ability_core::{AbilityConfig, EntityId, ItemKind, RoleKind, World};

/// Every message the ability engine shows to entities.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice<'a> {
    /// Broadcast when a victim is converted into the special role.
    Infected { nickname: &'a str },
    /// Broadcast when the healable role is healed by the special role.
    Healed {
        role: RoleKind,
        amount: f32,
        max_increase: f32,
    },
    /// Private confirmation to the healer.
    YouHealed { role: RoleKind },
    /// Broadcast when a disguise starts.
    Disguised { role: RoleKind, nickname: &'a str },
    DisguiseStarted { label: &'a str },
    DisguiseEnded,
    CooldownRemaining { secs: u64 },
    WeaponReplenished { kind: ItemKind },
    ItemAutoEquipped { kind: ItemKind },
    LoadoutEquipped { kind: ItemKind },
    DroppedWeaponReplenished,
    DisguiseItemRegained,
}

impl fmt::Display for Notice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infected { nickname } => write!(f, "{nickname} was infected!"),
            Self::Healed {
                role,
                amount,
                max_increase,
            } => write!(
                f,
                "{role} was healed!\nHealth: +{amount}, Max Health: +{max_increase}"
            ),
            Self::YouHealed { role } => write!(f, "You healed {role}!"),
            Self::Disguised { role, nickname } => {
                write!(f, "{role} {nickname} disguised as human!")
            }
            Self::DisguiseStarted { label } => write!(f, "You are now disguised as {label}!"),
            Self::DisguiseEnded => f.write_str("Your disguise has ended!"),
            Self::CooldownRemaining { secs } => write!(
                f,
                "Disguise ability cooling down! Remaining time: {secs} seconds"
            ),
            Self::WeaponReplenished { kind } => {
                write!(f, "Weapon automatically replenished and equipped: {kind}")
            }
            Self::ItemAutoEquipped { kind } => write!(f, "Automatically equipped item: {kind}"),
            Self::LoadoutEquipped { kind } => {
                write!(f, "Weapon and disguise item equipped\nDefault held: {kind}")
            }
            Self::DroppedWeaponReplenished => {
                f.write_str("Dropped weapon automatically replenished and equipped")
            }
            Self::DisguiseItemRegained => f.write_str("Disguise item regained"),
        }
    }
}

/// Shows `notice` to a single entity.
pub fn hint(world: &mut dyn World, entity: EntityId, notice: &Notice<'_>, duration: Duration) {
    world.notify(entity, &notice.to_string(), duration);
}

/// Shows `notice` to a single entity only when debug hints are enabled.
pub fn debug_hint(
    world: &mut dyn World,
    config: &AbilityConfig,
    entity: EntityId,
    notice: &Notice<'_>,
    duration: Duration,
) {
    if config.debug {
        hint(world, entity, notice, duration);
    }
}

/// Shows `notice` to every entity, offset by the configured hint position.
pub fn broadcast(world: &mut dyn World, config: &AbilityConfig, notice: &Notice<'_>) {
    let text = format!("{}{}", "\n".repeat(config.top_lines as usize), notice);
    let duration = config.display_duration();
    for entity in world.entities() {
        world.notify(entity, &text, duration);
    }
}
