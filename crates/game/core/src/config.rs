//! Ability configuration.
//!
//! Values are read once at start-up and stay constant for the lifetime of the
//! process. Every field has a default so partial config files are accepted.

use std::time::Duration;

use crate::state::{ItemKind, RoleKind};

/// Tunable parameters for the special role's loadout, healing and disguise.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AbilityConfig {
    /// Whether the plugin may be enabled at all.
    pub is_enabled: bool,
    /// Emit diagnostic hints to entities and error-level logs for grant failures.
    pub debug: bool,
    /// How long broadcast and ability hints stay on screen.
    pub display_duration_secs: f32,
    /// Blank lines prepended to broadcasts to position them on screen.
    pub top_lines: u32,
    /// Shield applied when an entity enters the special role.
    pub special_shield: f32,
    /// Health (current and maximum) applied when an entity enters the special role.
    pub special_health: f32,
    /// Maximum health added to the healable role per heal.
    pub heal_hp_increase: f32,
    /// Health restored to the healable role per heal.
    pub heal_amount: f32,
    /// Weapon issued to and enforced on the special role.
    pub weapon: ItemKind,
    /// Item whose use activates the disguise.
    pub disguise_item: ItemKind,
    pub disguise_duration_secs: f32,
    /// Minimum time between two activations, measured from activation start.
    pub disguise_cooldown_secs: f32,
    pub weapon_check_interval_secs: f32,
    /// Role whose presence gates every ability.
    pub special_role: RoleKind,
    /// Role that the special role heals instead of damaging.
    pub healable_role: RoleKind,
    /// Display identity shown while disguised.
    pub disguise_label: String,
}

impl AbilityConfig {
    pub const PLUGIN_NAME: &'static str = "SCP-049-2 Abilities";
    pub const PLUGIN_VERSION: (u16, u16, u16) = (2, 2, 0);

    /// Delay before the held-item correction and the dropped-weapon re-grant run.
    pub const CORRECTION_DELAY: Duration = Duration::from_millis(100);
    /// Duration of debug hints.
    pub const DEBUG_HINT_DURATION: Duration = Duration::from_secs(3);
    /// Duration of the loadout-equipped debug hint.
    pub const LOADOUT_HINT_DURATION: Duration = Duration::from_secs(10);
    /// Duration of the cooldown rejection and disguise-ended hints.
    pub const STATUS_HINT_DURATION: Duration = Duration::from_secs(5);

    pub const DEFAULT_DISGUISE_LABEL: &'static str = "Class-D Personnel";

    pub fn new() -> Self {
        Self {
            is_enabled: true,
            debug: false,
            display_duration_secs: 8.0,
            top_lines: 3,
            special_shield: 800.0,
            special_health: 49.0,
            heal_hp_increase: 25.0,
            heal_amount: 30.0,
            weapon: ItemKind::GunFSP9,
            disguise_item: ItemKind::Coin,
            disguise_duration_secs: 30.0,
            disguise_cooldown_secs: 60.0,
            weapon_check_interval_secs: 0.5,
            special_role: RoleKind::Scp0492,
            healable_role: RoleKind::Scp049,
            disguise_label: Self::DEFAULT_DISGUISE_LABEL.to_owned(),
        }
    }

    pub fn display_duration(&self) -> Duration {
        Duration::from_secs_f32(self.display_duration_secs)
    }

    pub fn disguise_duration(&self) -> Duration {
        Duration::from_secs_f32(self.disguise_duration_secs)
    }

    pub fn disguise_cooldown(&self) -> Duration {
        Duration::from_secs_f32(self.disguise_cooldown_secs)
    }

    pub fn weapon_check_interval(&self) -> Duration {
        Duration::from_secs_f32(self.weapon_check_interval_secs)
    }

    /// Checks the values a host could get wrong in a config file.
    ///
    /// Durations must be non-negative and representable as a [`Duration`].
    /// The weapon check interval must be positive, and the weapon, disguise
    /// item and roles must be distinct.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("display_duration_secs", self.display_duration_secs),
            ("disguise_duration_secs", self.disguise_duration_secs),
            ("disguise_cooldown_secs", self.disguise_cooldown_secs),
            ("weapon_check_interval_secs", self.weapon_check_interval_secs),
        ];
        for (field, value) in durations {
            if Duration::try_from_secs_f32(value).is_err() {
                return Err(ConfigError::InvalidDuration { field, value });
            }
        }
        if self.weapon_check_interval_secs <= 0.0 {
            return Err(ConfigError::NonPositiveInterval(
                self.weapon_check_interval_secs,
            ));
        }

        let amounts = [
            ("special_shield", self.special_shield),
            ("special_health", self.special_health),
            ("heal_hp_increase", self.heal_hp_increase),
            ("heal_amount", self.heal_amount),
        ];
        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidAmount { field, value });
            }
        }
        if self.special_health <= 0.0 {
            return Err(ConfigError::InvalidAmount {
                field: "special_health",
                value: self.special_health,
            });
        }

        if self.weapon == self.disguise_item {
            return Err(ConfigError::ConflictingItems(self.weapon));
        }
        if self.special_role == self.healable_role {
            return Err(ConfigError::ConflictingRoles(self.special_role));
        }
        if !self.special_role.is_alive() {
            return Err(ConfigError::DeadSpecialRole(self.special_role));
        }
        Ok(())
    }
}

impl Default for AbilityConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejected configuration values.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be a non-negative number of seconds within range (got {value})")]
    InvalidDuration { field: &'static str, value: f32 },

    #[error("weapon_check_interval_secs must be positive (got {0})")]
    NonPositiveInterval(f32),

    #[error("{field} must be a finite, non-negative amount (got {value})")]
    InvalidAmount { field: &'static str, value: f32 },

    #[error("weapon and disguise item must differ (both are {0})")]
    ConflictingItems(ItemKind),

    #[error("special and healable role must differ (both are {0})")]
    ConflictingRoles(RoleKind),

    #[error("special role {0} is not a living role")]
    DeadSpecialRole(RoleKind),
}
