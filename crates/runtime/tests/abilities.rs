mod common;

use std::time::Duration;

use ability_core::{
    AbilityConfig, ActorState, EntityId, INVENTORY_SLOTS, ItemKind, RoleKind, Vitals, World,
};
use ability_runtime::{DisguisePhase, LifecycleEvent};
use common::{FRAME, Host};

#[test]
fn special_role_gets_stats_and_loadout() {
    let mut host = Host::new();
    let entity = host.spawn(ActorState::new(EntityId(1), "zed", RoleKind::ClassD));
    host.world.add_item(entity, ItemKind::Medkit);
    host.world.set_shield(entity, 300.0);

    host.change_role(entity, RoleKind::Scp0492);

    // Shield replaced at once, items only after the role change applied.
    assert_eq!(host.world.shield(entity), Some(800.0));
    assert_eq!(host.item_kinds(entity), vec![ItemKind::Medkit]);

    host.run_for(FRAME);
    assert_eq!(host.item_kinds(entity), vec![ItemKind::GunFSP9, ItemKind::Coin]);
    assert_eq!(host.world.held_item(entity).map(|item| item.kind), Some(ItemKind::GunFSP9));
    assert_eq!(
        host.world.health(entity),
        Some(Vitals {
            current: 49.0,
            maximum: 49.0
        })
    );
    assert!(host.plugin.has_weapon_check(entity));
}

#[test]
fn lethal_hit_from_special_role_infects_victim() {
    let mut host = Host::new();
    let attacker = host.spawn_special(1, "zed");
    let victim = host.spawn(ActorState::new(EntityId(2), "bob", RoleKind::Scientist));
    host.world.add_item(victim, ItemKind::KeycardScientist);
    host.world.add_item(victim, ItemKind::Medkit);
    host.world.add_item(victim, ItemKind::Radio);

    assert!(!host.kill(victim, Some(attacker)));

    assert!(host.world.is_alive(victim));
    assert_eq!(host.world.role(victim), Some(RoleKind::Scp0492));
    assert!(host.saw(attacker, "bob was infected!"));

    host.run_for(FRAME);
    assert_eq!(host.item_kinds(victim), vec![ItemKind::GunFSP9, ItemKind::Coin]);
    assert_eq!(host.world.held_item(victim).map(|item| item.kind), Some(ItemKind::GunFSP9));
    assert_eq!(host.world.shield(victim), Some(800.0));
    assert!(host.plugin.has_weapon_check(victim));
}

#[test]
fn scp_victims_and_self_harm_die_normally() {
    let mut host = Host::new();
    let zed = host.spawn_special(1, "zed");
    let peanut = host.spawn(ActorState::new(EntityId(2), "peanut", RoleKind::Scp173));
    let bob = host.spawn(ActorState::new(EntityId(3), "bob", RoleKind::ClassD));

    assert!(host.kill(peanut, Some(zed)));
    assert!(host.kill(bob, None));
    assert!(host.kill(zed, Some(zed)));

    assert_eq!(host.world.role(peanut), Some(RoleKind::Spectator));
    assert_eq!(host.world.role(bob), Some(RoleKind::Spectator));
    assert!(!host.plugin.registry().contains(zed));
    assert_eq!(host.plugin.scheduler().active_count(), 0);
}

#[test]
fn special_role_heals_instead_of_damaging() {
    let mut host = Host::new();
    let zed = host.spawn_special(1, "zed");
    let doctor = host.spawn(
        ActorState::new(EntityId(2), "doctor", RoleKind::Scp049).with_vitals(Vitals {
            current: 60.0,
            maximum: 100.0,
        }),
    );

    assert!(!host.hurt(doctor, Some(zed), 40.0));
    assert_eq!(
        host.world.health(doctor),
        Some(Vitals {
            current: 90.0,
            maximum: 125.0
        })
    );

    // 140 + 30 exceeds the raised maximum of 150.
    host.world.set_health(doctor, 140.0);
    assert!(!host.hurt(doctor, Some(zed), 40.0));
    assert_eq!(
        host.world.health(doctor),
        Some(Vitals {
            current: 150.0,
            maximum: 150.0
        })
    );

    assert!(host.saw(zed, "You healed Scp049!"));
    assert!(host.saw(doctor, "Health: +30, Max Health: +25"));
}

#[test]
fn other_damage_goes_through() {
    let mut host = Host::new();
    let zed = host.spawn_special(1, "zed");
    let bob = host.spawn(ActorState::new(EntityId(2), "bob", RoleKind::ClassD));
    let doctor = host.spawn(ActorState::new(EntityId(3), "doctor", RoleKind::Scp049));

    assert!(host.hurt(bob, Some(zed), 10.0));
    assert!(host.hurt(doctor, Some(bob), 10.0));
    assert!(host.hurt(doctor, None, 10.0));
    assert_eq!(host.world.health(doctor).map(|vitals| vitals.current), Some(80.0));
}

#[test]
fn attack_is_always_allowed_for_special_role() {
    let mut host = Host::new();
    let zed = host.spawn_special(1, "zed");
    let bob = host.spawn(ActorState::new(EntityId(2), "bob", RoleKind::ClassD));

    let mut event = LifecycleEvent::attacking(zed, bob, false);
    assert!(host.plugin.dispatch(&mut host.world, &mut event));

    let mut event = LifecycleEvent::attacking(bob, zed, false);
    assert!(!host.plugin.dispatch(&mut host.world, &mut event));
}

#[test]
fn weapon_is_back_within_one_check_interval() {
    let mut host = Host::new();
    let zed = host.spawn_special(1, "zed");
    let weapon = host.item(zed, ItemKind::GunFSP9);

    // Removed behind the plugin's back, so only the loop can notice.
    host.world.drop_item(zed, weapon.serial).unwrap();
    assert!(!host.world.has_item_kind(zed, ItemKind::GunFSP9));

    let interval = host.plugin.config().weapon_check_interval();
    host.run_for(interval);

    let held = host.world.held_item(zed).unwrap();
    assert_eq!(held.kind, ItemKind::GunFSP9);
    assert_ne!(held.serial, weapon.serial);
}

#[test]
fn full_inventory_delays_weapon_until_a_slot_frees() {
    let mut host = Host::new();
    let zed = host.spawn_special(1, "zed");
    let weapon = host.item(zed, ItemKind::GunFSP9);
    host.world.drop_item(zed, weapon.serial).unwrap();
    while host.world.add_item(zed, ItemKind::Medkit).is_some() {}
    assert_eq!(host.world.items(zed).len(), INVENTORY_SLOTS);

    let interval = host.plugin.config().weapon_check_interval();
    host.run_for(interval * 3);

    // Every grant failed, but the check keeps running.
    assert!(!host.world.has_item_kind(zed, ItemKind::GunFSP9));
    assert!(host.plugin.has_weapon_check(zed));
    assert_eq!(host.world.held_item(zed).map(|item| item.kind), Some(ItemKind::Coin));

    let medkit = host.item(zed, ItemKind::Medkit);
    host.world.drop_item(zed, medkit.serial).unwrap();
    host.run_for(interval);

    assert_eq!(host.world.held_item(zed).map(|item| item.kind), Some(ItemKind::GunFSP9));
    assert_eq!(host.world.items(zed).len(), INVENTORY_SLOTS);
}

#[test]
fn dropped_weapon_is_regranted_quickly() {
    let mut host = Host::with_config(AbilityConfig {
        weapon_check_interval_secs: 30.0,
        ..AbilityConfig::default()
    });
    let zed = host.spawn_special(1, "zed");

    assert!(host.drop_item(zed, ItemKind::GunFSP9));
    assert_eq!(host.item_kinds(zed), vec![ItemKind::Coin]);

    host.run_for(AbilityConfig::CORRECTION_DELAY);
    assert_eq!(host.item_kinds(zed), vec![ItemKind::Coin, ItemKind::GunFSP9]);
    assert_eq!(host.world.held_item(zed).map(|item| item.kind), Some(ItemKind::GunFSP9));
}

#[test]
fn held_item_snaps_back_to_first_slot() {
    let mut host = Host::new();
    let zed = host.spawn_special(1, "zed");

    host.hold(zed, ItemKind::Coin);
    assert_eq!(host.world.held_item(zed).map(|item| item.kind), Some(ItemKind::Coin));

    host.run_for(AbilityConfig::CORRECTION_DELAY);
    assert_eq!(host.world.held_item(zed), host.world.first_item(zed));
}

#[test]
fn humans_may_hold_anything() {
    let mut host = Host::new();
    let bob = host.spawn(ActorState::new(EntityId(1), "bob", RoleKind::ClassD));
    host.world.add_item(bob, ItemKind::Radio);
    host.world.add_item(bob, ItemKind::Coin);

    host.hold(bob, ItemKind::Coin);
    host.run_for(Duration::from_secs(1));

    assert_eq!(host.world.held_item(bob).map(|item| item.kind), Some(ItemKind::Coin));
    assert_eq!(host.plugin.scheduler().active_count(), 0);
}

#[test]
fn disguise_cycle() {
    let mut host = Host::new();
    let bob = host.spawn(ActorState::new(EntityId(2), "bob", RoleKind::ClassD));
    let zed = host.spawn(
        ActorState::new(EntityId(1), "zed", RoleKind::ClassD).with_custom_info("Janitor"),
    );
    host.change_role(zed, RoleKind::Scp0492);
    host.run_for(FRAME);

    assert!(host.use_item(zed, ItemKind::Coin));
    assert_eq!(host.world.custom_info(zed).as_deref(), Some("Class-D Personnel"));
    assert_eq!(host.plugin.disguise_phase(zed), DisguisePhase::Active);
    assert!(host.saw(bob, "Scp0492 zed disguised as human!"));

    host.run_for(Duration::from_secs(10));
    assert!(!host.use_item(zed, ItemKind::Coin));
    assert!(host.saw(zed, "Remaining time: 50 seconds"));

    // The coin is gone by the time the disguise runs out.
    assert!(host.drop_item(zed, ItemKind::Coin));

    host.run_for(Duration::from_secs(20));
    assert_eq!(host.plugin.disguise_phase(zed), DisguisePhase::Idle);
    assert_eq!(host.world.custom_info(zed).as_deref(), Some("Janitor"));
    assert!(host.saw(zed, "Your disguise has ended!"));
    assert!(host.world.has_item_kind(zed, ItemKind::Coin));

    host.run_for(Duration::from_secs(30));
    assert!(host.use_item(zed, ItemKind::Coin));
}

#[test]
fn death_ends_disguise_without_restoring() {
    let mut host = Host::new();
    let zed = host.spawn(
        ActorState::new(EntityId(1), "zed", RoleKind::ClassD).with_custom_info("Janitor"),
    );
    host.change_role(zed, RoleKind::Scp0492);
    host.run_for(FRAME);

    assert!(host.use_item(zed, ItemKind::Coin));
    host.run_for(Duration::from_secs(5));
    assert!(host.kill(zed, None));
    host.run_for(Duration::from_secs(30));

    assert_eq!(host.world.custom_info(zed).as_deref(), Some("Class-D Personnel"));
    assert!(!host.saw(zed, "Your disguise has ended!"));
    assert!(host.world.items(zed).is_empty());
    assert_eq!(host.plugin.scheduler().active_count(), 0);
}

#[test]
fn disguise_item_does_nothing_outside_special_role() {
    let mut host = Host::new();
    let bob = host.spawn(ActorState::new(EntityId(1), "bob", RoleKind::ClassD));
    host.world.add_item(bob, ItemKind::Coin);

    assert!(host.use_item(bob, ItemKind::Coin));
    assert!(host.world.custom_info(bob).unwrap().is_empty());
    assert!(!host.plugin.registry().contains(bob));
}

#[test]
fn leaving_special_role_stops_weapon_check() {
    let mut host = Host::new();
    let zed = host.spawn_special(1, "zed");
    assert!(host.plugin.has_weapon_check(zed));

    host.change_role(zed, RoleKind::ClassD);
    assert!(!host.plugin.has_weapon_check(zed));

    host.world.clear_inventory(zed);
    host.run_for(Duration::from_secs(2));
    assert!(host.world.items(zed).is_empty());
}
