use glam::Vec2;
use horde_survivor::sim::*;
use std::collections::HashSet;

/// Session where the test decides every spawn and attack
fn quiet_state(seed: u64) -> GameState {
    let mut state = GameState::new(seed);
    state.tuning.spawn_interval_ticks = 1_000_000;
    state.tuning.boss_attack_interval_ticks = 0;
    state
}

fn up_left() -> TickInput {
    TickInput {
        movement: MoveIntent {
            up: true,
            left: true,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn avatar_pinned_in_corner() {
    let mut state = quiet_state(1);
    state.avatar.pos = Vec2::ZERO;
    for _ in 0..50 {
        tick(&mut state, &up_left());
        assert_eq!(state.avatar.pos, Vec2::ZERO);
    }
}

#[test]
fn avatar_walks_diagonally_at_full_speed_per_axis() {
    let mut state = quiet_state(1);
    let start = state.avatar.pos;
    tick(&mut state, &up_left());
    assert_eq!(state.avatar.pos, start - Vec2::new(3.0, 3.0));
}

#[test]
fn regular_combatant_dies_on_second_hit() {
    let mut c = Combatant::new(1, Tier::Regular, Vec2::ZERO, 1.0);
    assert_eq!(c.health, 2);
    assert!(!c.apply_damage(1, false));
    assert_eq!(c.health, 1);
    assert!(c.apply_damage(1, false));
    assert_eq!(c.health, 0);
}

#[test]
fn five_xp_opens_level_up_menu() {
    let mut state = quiet_state(77);
    assert_eq!(state.avatar.xp, 0);
    assert_eq!(state.avatar.level, 1);

    state.avatar.grant_experience(5);
    tick(&mut state, &TickInput::default());

    assert_eq!(state.phase, GamePhase::LevelUpMenu);
    let distinct: HashSet<_> = state.upgrade_options.iter().collect();
    assert_eq!(state.upgrade_options.len(), 3);
    assert_eq!(distinct.len(), 3);

    let snap = Snapshot::capture(&state);
    assert_eq!(snap.upgrade_options.len(), 3);
}

#[test]
fn spawner_fires_once_per_interval() {
    let mut state = GameState::new(5);
    state.tuning.boss_attack_interval_ticks = 0;
    assert_eq!(state.tuning.spawn_interval_ticks, 60);

    for t in 1..=59 {
        tick(&mut state, &TickInput::default());
        assert!(state.combatants.is_empty(), "early spawn at tick {t}");
    }
    tick(&mut state, &TickInput::default());
    assert_eq!(state.combatants.len(), 1);
    assert_eq!(state.spawn_timer, 0);

    for _ in 0..59 {
        tick(&mut state, &TickInput::default());
    }
    assert_eq!(state.combatants.len(), 1);
    tick(&mut state, &TickInput::default());
    assert_eq!(state.combatants.len(), 2);
}

#[test]
fn every_tenth_kill_spawns_one_scaled_boss() {
    let mut state = quiet_state(9);
    let spot = Vec2::new(150.0, 150.0);

    for (kills_before, expected_health) in [(9u32, 15u32), (19, 20)] {
        state.kill_count = kills_before;
        let victim = state.spawn_combatant(Tier::Flying, spot);
        state
            .avatar
            .projectiles
            .push(Projectile::linear(spot, Vec2::ZERO, 10.0));
        let bosses_before = state.combatants.iter().filter(|c| c.is_boss()).count();

        tick(&mut state, &TickInput::default());

        assert!(state.combatant(victim).is_none());
        assert_eq!(state.kill_count, kills_before + 1);
        let bosses_after = state.combatants.iter().filter(|c| c.is_boss()).count();
        assert_eq!(bosses_after, bosses_before + 1);

        let boss = state.boss().unwrap();
        assert_eq!(boss.max_health, expected_health);
        assert_eq!(boss.health, expected_health);
        assert_eq!(state.escalation_level, (kills_before + 1) / 10);
    }
}

#[test]
fn escalation_boss_enters_from_top_center() {
    let mut state = quiet_state(9);
    state.kill_count = 9;
    let spot = Vec2::new(150.0, 150.0);
    state.spawn_combatant(Tier::Flying, spot);
    state
        .avatar
        .projectiles
        .push(Projectile::linear(spot, Vec2::ZERO, 10.0));

    // Spawned after the movement step, so it has not moved yet
    tick(&mut state, &TickInput::default());
    let boss = state.boss().unwrap();
    assert_eq!(boss.pos, Vec2::new(600.0, -50.0));
}

#[test]
fn stale_boss_reference_is_absent_in_snapshot() {
    let mut state = quiet_state(4);
    state.current_boss = Some(1234);
    let snap = Snapshot::capture(&state);
    assert!(snap.boss.is_none());
}

#[test]
fn full_run_with_reset() {
    let mut state = GameState::new(31337);
    state.tuning.player_max_health = 1;
    state.reset();
    state.spawn_combatant(Tier::Regular, state.avatar.pos);

    tick(&mut state, &TickInput::default());
    assert_eq!(state.phase, GamePhase::GameOver);

    // Inputs other than reset do nothing
    tick(&mut state, &up_left());
    assert_eq!(state.phase, GamePhase::GameOver);

    tick(
        &mut state,
        &TickInput {
            reset: true,
            ..Default::default()
        },
    );
    assert_eq!(state.phase, GamePhase::Running);
    assert_eq!(state.avatar.health, 1);
    assert_eq!(state.kill_count, 0);
    assert!(state.pickups.is_empty());
    assert!(state.avatar.projectiles.is_empty());
}
