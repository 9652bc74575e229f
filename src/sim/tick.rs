//! Fixed-step simulation tick
//!
//! One call advances the session by exactly one frame. Running ticks follow a
//! fixed order: fire triggers, avatar movement, projectiles, combatants,
//! pickups, then the collision passes, game-over check, spawner and level-up
//! check. Entity removals are collected during each pass and applied after it.

use glam::Vec2;
use rand::Rng;

use super::avatar::MoveIntent;
use super::combatant::{Combatant, EntityId, Tier};
use super::pickup::{Pickup, SPAWN_JITTER};
use super::projectile::{Blast, ProjectileKind};
use super::state::{GamePhase, GameState};
use super::upgrade::sample_upgrades;
use crate::tuning::TierWeights;

/// Damage a single projectile deals on a direct hit
pub const BULLET_DAMAGE: u32 = 1;
/// Pickups dropped by a boss at escalation level 0
pub const BOSS_DROP_BASE: u32 = 10;
/// Extra pickups per boss escalation level
pub const BOSS_DROP_PER_LEVEL: u32 = 5;

/// Autopilot flees combatants closer than this
const AUTOPILOT_DANGER_RADIUS: f32 = 150.0;
/// Autopilot ignores steering offsets smaller than this
const AUTOPILOT_DEADZONE: f32 = 2.0;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Currently pressed directions
    pub movement: MoveIntent,
    /// Fire toward the nearest combatant
    pub fire_nearest: bool,
    /// Fire toward a point in arena coordinates
    pub fire_at: Option<Vec2>,
    /// Pick upgrade 0..=2 while the level-up menu is open
    pub select_upgrade: Option<usize>,
    /// Start a new run after game over
    pub reset: bool,
    /// Stop the frame loop
    pub quit: bool,
    /// Idle/demo mode - AI plays the game
    pub autopilot: bool,
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.quit {
        if !state.quit_requested {
            log::info!("Quit requested");
        }
        state.quit_requested = true;
        return;
    }

    let mut input = input.clone();
    if input.autopilot {
        autopilot(state, &mut input);
    }
    let input = &input;

    match state.phase {
        GamePhase::GameOver => {
            if input.reset {
                state.reset();
            }
            return;
        }
        GamePhase::LevelUpMenu => {
            if let Some(index) = input.select_upgrade {
                select_upgrade(state, index);
            }
            return;
        }
        GamePhase::Running => {}
    }

    state.time_ticks += 1;

    // Fire triggers
    if input.fire_nearest {
        if let Some(target) = state.nearest_combatant_pos() {
            state.avatar.fire(target, &state.tuning);
        }
    }
    if let Some(point) = input.fire_at {
        state.avatar.fire(point, &state.tuning);
    }

    // (1) Avatar movement
    let (width, height) = (state.tuning.arena_width, state.tuning.arena_height);
    let direction = input.movement.to_vector(state.tuning.normalize_diagonal);
    state.avatar.apply_movement_intent(direction, width, height);

    // (2) Projectiles
    for projectile in state.avatar.projectiles.iter_mut() {
        projectile.advance(&state.combatants);
    }
    state
        .avatar
        .projectiles
        .retain(|p| !p.is_out_of_bounds(width, height) && !p.has_detonated());
    state.avatar.tick_cooldown();

    // (3) Combatants, boss attacks, pickups
    advance_combatants(state);
    for pickup in state.pickups.iter_mut() {
        pickup.advance();
    }

    // (4)-(6) Collisions
    resolve_avatar_contacts(state);
    resolve_projectile_hits(state);
    resolve_pickup_collection(state);

    // (7) Game over
    if state.avatar.is_dead() {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: level {}, {} kills, {} ticks",
            state.avatar.level,
            state.kill_count,
            state.time_ticks
        );
        return;
    }

    // (8) Spawner
    state.spawn_timer += 1;
    if state.spawn_timer >= state.tuning.spawn_interval_ticks {
        state.spawn_timer = 0;
        spawn_ambient(state);
    }

    // (9) Level up
    check_level_up(state);
}

/// Apply the chosen upgrade and close the menu.
///
/// Out-of-range indices are discarded and the menu stays open. Returns
/// whether the selection was accepted.
pub fn select_upgrade(state: &mut GameState, index: usize) -> bool {
    if state.phase != GamePhase::LevelUpMenu {
        return false;
    }
    let Some(&option) = state.upgrade_options.get(index) else {
        log::warn!(
            "Ignoring upgrade index {} ({} options offered)",
            index,
            state.upgrade_options.len()
        );
        return false;
    };
    state.avatar.apply_upgrade(option);
    state.upgrade_options.clear();
    state.phase = GamePhase::Running;
    log::info!("Upgrade chosen: {}", option.name());
    true
}

fn advance_combatants(state: &mut GameState) {
    let target = state.avatar.pos;
    let knockback_speed = state.tuning.knockback_speed;
    let interval = state.tuning.boss_attack_interval_ticks;
    let (count, speed, size) = (
        state.tuning.shockwave_count,
        state.tuning.shockwave_speed,
        state.tuning.shockwave_size,
    );

    let mut shockwaves = Vec::new();
    for combatant in state.combatants.iter_mut() {
        combatant.advance(target, knockback_speed);
        if combatant.tick_attack(interval) {
            shockwaves.extend(combatant.special_attack(count, speed, size));
        }
    }
    state.avatar.projectiles.extend(shockwaves);
}

/// Any overlap costs the avatar one hit per tick and knocks back every
/// overlapping combatant.
fn resolve_avatar_contacts(state: &mut GameState) {
    let hitbox = state.avatar.hitbox();
    let source = state.avatar.pos;
    let distance = state.tuning.pushback_distance;

    let mut touched = false;
    for combatant in state.combatants.iter_mut().filter(|c| c.is_alive()) {
        if combatant.hitbox().overlaps(&hitbox) {
            touched = true;
            combatant.apply_knockback(source, distance);
        }
    }

    if touched {
        state.avatar.apply_damage(state.tuning.contact_damage);
    }
}

/// Each projectile strikes at most the first combatant it overlaps.
fn resolve_projectile_hits(state: &mut GameState) {
    let ignore_armor = state.avatar.armor_piercing;
    let blast = Blast {
        damage: state.tuning.explosion_damage,
        knockback: state.tuning.explosion_knockback,
        ignore_armor,
    };

    let mut kills: Vec<EntityId> = Vec::new();
    let combatants = &mut state.combatants;
    state.avatar.projectiles.retain_mut(|projectile| {
        let hitbox = projectile.hitbox();
        let Some(index) = combatants
            .iter()
            .position(|c| projectile.can_hit(c) && c.hitbox().overlaps(&hitbox))
        else {
            return true;
        };

        if projectile.kind() == ProjectileKind::Explosive {
            let struck = combatants[index].id;
            kills.extend(projectile.detonate(&mut combatants[..], Some(struck), blast));
        } else if combatants[index].apply_damage(BULLET_DAMAGE, ignore_armor) {
            kills.push(combatants[index].id);
        }
        false
    });

    for id in kills {
        handle_kill(state, id);
    }
    state.combatants.retain(|c| c.is_alive());
}

fn resolve_pickup_collection(state: &mut GameState) {
    let hitbox = state.avatar.hitbox();
    let before = state.pickups.len();
    state.pickups.retain(|p| !p.hitbox().overlaps(&hitbox));
    let collected = before - state.pickups.len();
    if collected > 0 {
        state.avatar.grant_experience(collected as u32);
    }
}

/// Credit a kill: count it, drop pickups, and escalate on every Nth kill.
/// The dead combatant stays in the collection until the pass compacts it.
fn handle_kill(state: &mut GameState, id: EntityId) {
    let Some(dead) = state.combatants.iter().find(|c| c.id == id) else {
        return;
    };
    let (pos, tier, level) = (dead.pos, dead.tier, dead.escalation_level);

    state.kill_count += 1;
    log::debug!("Killed {} #{} (kills: {})", tier.as_str(), id, state.kill_count);

    let drops = match tier {
        Tier::Boss => BOSS_DROP_BASE + BOSS_DROP_PER_LEVEL * level,
        _ => 1,
    };
    for _ in 0..drops {
        spawn_pickup(state, pos);
    }

    if state.current_boss == Some(id) {
        state.current_boss = None;
        log::info!("Boss defeated at escalation level {}", level);
    }

    if state.kill_count.checked_rem(state.tuning.boss_kill_interval) == Some(0) {
        escalate(state);
    }
}

/// Force-spawn a scaled boss above the arena
fn escalate(state: &mut GameState) {
    state.escalation_level = state.kill_count / state.tuning.boss_kill_interval;
    let level = state.escalation_level;

    if state.tuning.boss_clears_field {
        // Dead combatants stay until their kill has been credited
        state.combatants.retain(|c| c.is_boss() || !c.is_alive());
    }

    let pos = Vec2::new(state.tuning.arena_width / 2.0, -state.tuning.spawn_margin);
    let id = state.next_entity_id();
    let boss = Combatant::boss(id, pos, state.tuning.enemy_speed, level);
    log::info!(
        "Boss escalation {}: boss #{} with {} health",
        level,
        id,
        boss.max_health
    );
    state.combatants.push(boss);
    state.current_boss = Some(id);
}

fn spawn_pickup(state: &mut GameState, at: Vec2) {
    let jitter = Vec2::new(
        state.rng.random_range(-SPAWN_JITTER..=SPAWN_JITTER),
        state.rng.random_range(-SPAWN_JITTER..=SPAWN_JITTER),
    );
    state
        .pickups
        .push(Pickup::new(at + jitter, state.tuning.pickup_size));
}

/// Spawn one combatant of a random tier just outside a random edge
fn spawn_ambient(state: &mut GameState) {
    let tier = roll_tier(&mut state.rng, &state.tuning.tier_weights);
    let pos = spawn_position(
        &mut state.rng,
        state.tuning.arena_width,
        state.tuning.arena_height,
        state.tuning.spawn_margin,
    );
    let id = state.spawn_combatant(tier, pos);
    log::debug!(
        "Spawned {} #{} at ({:.0}, {:.0})",
        tier.as_str(),
        id,
        pos.x,
        pos.y
    );
}

/// Weighted tier draw
pub fn roll_tier<R: Rng + ?Sized>(rng: &mut R, weights: &TierWeights) -> Tier {
    let table = [
        (Tier::Regular, weights.regular),
        (Tier::Flying, weights.flying),
        (Tier::Armored, weights.armored),
        (Tier::Boss, weights.boss),
    ];
    let roll = rng.random::<f32>() * weights.total();

    let mut acc = 0.0;
    for (tier, weight) in table {
        acc += weight;
        if roll < acc {
            return tier;
        }
    }
    // Rounding left the roll past the last bucket
    table
        .iter()
        .rev()
        .find(|(_, w)| *w > 0.0)
        .map(|(tier, _)| *tier)
        .unwrap_or(Tier::Regular)
}

/// Uniform point along one of the four edges, pushed out by `margin`
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32, margin: f32) -> Vec2 {
    match rng.random_range(0..4u8) {
        0 => Vec2::new(rng.random_range(0.0..=width), -margin),
        1 => Vec2::new(rng.random_range(0.0..=width), height + margin),
        2 => Vec2::new(-margin, rng.random_range(0.0..=height)),
        _ => Vec2::new(width + margin, rng.random_range(0.0..=height)),
    }
}

fn check_level_up(state: &mut GameState) {
    if !state.avatar.ready_to_level() {
        return;
    }
    state.avatar.level_up();
    state.upgrade_options = sample_upgrades(&mut state.rng);
    state.phase = GamePhase::LevelUpMenu;
    log::info!(
        "Level up! Now level {} (options: {})",
        state.avatar.level,
        state
            .upgrade_options
            .iter()
            .map(|o| o.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
}

/// Fill in inputs for demo play
fn autopilot(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::GameOver => input.reset = true,
        GamePhase::LevelUpMenu => input.select_upgrade = Some(0),
        GamePhase::Running => {
            input.fire_nearest = true;

            let pos = state.avatar.pos;
            let center = state.arena_size() / 2.0;
            let threat = state
                .nearest_combatant_pos()
                .filter(|t| t.distance(pos) < AUTOPILOT_DANGER_RADIUS);

            let goal = if let Some(threat) = threat {
                // Run away, drifting back toward the middle to avoid corners
                pos + (pos - threat) + (center - pos) * 0.25
            } else {
                state
                    .pickups
                    .iter()
                    .min_by(|a, b| {
                        a.pos
                            .distance_squared(pos)
                            .partial_cmp(&b.pos.distance_squared(pos))
                            .unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .map(|p| p.pos)
                    .unwrap_or(center)
            };

            let delta = goal - pos;
            input.movement = MoveIntent {
                left: delta.x < -AUTOPILOT_DEADZONE,
                right: delta.x > AUTOPILOT_DEADZONE,
                up: delta.y < -AUTOPILOT_DEADZONE,
                down: delta.y > AUTOPILOT_DEADZONE,
            };
        }
    }
}
