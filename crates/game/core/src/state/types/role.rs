//! Roles, teams and the reasons an entity changes role.

/// Allegiance group a role belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    Scps,
    FoundationForces,
    ChaosInsurgency,
    Scientists,
    ClassD,
    Dead,
    OtherAlive,
}

/// Role an entity currently plays in the simulation.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum RoleKind {
    Spectator,
    ClassD,
    Scientist,
    FacilityGuard,
    NtfPrivate,
    NtfCaptain,
    ChaosConscript,
    ChaosRifleman,
    Tutorial,
    Scp049,
    Scp0492,
    Scp096,
    Scp106,
    Scp173,
    Scp939,
}

impl RoleKind {
    pub const fn team(self) -> Team {
        match self {
            Self::Spectator => Team::Dead,
            Self::ClassD => Team::ClassD,
            Self::Scientist => Team::Scientists,
            Self::FacilityGuard | Self::NtfPrivate | Self::NtfCaptain => Team::FoundationForces,
            Self::ChaosConscript | Self::ChaosRifleman => Team::ChaosInsurgency,
            Self::Tutorial => Team::OtherAlive,
            Self::Scp049
            | Self::Scp0492
            | Self::Scp096
            | Self::Scp106
            | Self::Scp173
            | Self::Scp939 => Team::Scps,
        }
    }

    /// Returns true if an entity in this role is alive.
    pub const fn is_alive(self) -> bool {
        !matches!(self, Self::Spectator)
    }
}

/// Why a role change happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpawnReason {
    RoundStart,
    Respawn,
    Died,
    Revived,
    ForceClass,
}
