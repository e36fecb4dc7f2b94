//! Item-related state types.
//!
//! - ItemKind: catalogue of item types a host can issue
//! - ItemSerial: per-instance identity assigned by the host
//! - Item: an item instance held in an inventory

use std::fmt;

/// Item type identifiers understood by the host.
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
pub enum ItemKind {
    KeycardJanitor,
    KeycardScientist,
    KeycardGuard,
    Radio,
    Flashlight,
    Coin,
    Medkit,
    Painkillers,
    Adrenaline,
    GrenadeHE,
    GrenadeFlash,
    ArmorLight,
    ArmorCombat,
    GunCOM15,
    GunCOM18,
    GunFSP9,
    GunCrossvec,
    GunE11SR,
    GunAK,
    GunLogicer,
    GunShotgun,
    GunRevolver,
}

/// Host-assigned identity of a single item instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemSerial(pub u32);

impl fmt::Display for ItemSerial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item:{}", self.0)
    }
}

/// An item instance inside an entity's inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub serial: ItemSerial,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(serial: ItemSerial, kind: ItemKind) -> Self {
        Self { serial, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(ItemKind::from_str("gunfsp9").unwrap(), ItemKind::GunFSP9);
        assert_eq!(ItemKind::from_str("Coin").unwrap(), ItemKind::Coin);
        assert!(ItemKind::from_str("Banana").is_err());
    }
}
