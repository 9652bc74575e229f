//! Enemy entities
//!
//! Tiers share one struct; per-tier behavior comes from the stat table in
//! [`Tier::stats`] and a few `match`es on the tier tag.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Hitbox;
use super::projectile::Projectile;
use crate::{direction_to, from_angle};

/// Stable identifier for a combatant (never reused within a session)
pub type EntityId = u32;

/// Extra health a boss gains per escalation level
pub const BOSS_HEALTH_PER_LEVEL: u32 = 5;
/// Pursuit speed multiplier applied to bosses
pub const BOSS_PURSUIT_BONUS: f32 = 1.2;
/// Fractional slowdown per escalation level
pub const BOSS_SLOWDOWN_PER_LEVEL: f32 = 0.05;
/// Escalation slowdown never drops a boss below this fraction of base speed
pub const BOSS_MIN_SPEED_FACTOR: f32 = 0.75;
/// Visual (and hitbox) growth per escalation level
pub const BOSS_SCALE_PER_LEVEL: f32 = 0.1;

/// Enemy category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Regular,
    Flying,
    Armored,
    Boss,
}

/// Damage mitigation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmorRule {
    None,
    /// Subtract a flat amount, floored at zero
    Flat(u32),
    /// Reduce by a percentage; the mitigated part is rounded down
    Percent(u32),
}

impl ArmorRule {
    /// Damage that gets through this armor
    pub fn mitigate(self, raw: u32) -> u32 {
        match self {
            ArmorRule::None => raw,
            ArmorRule::Flat(amount) => raw.saturating_sub(amount),
            ArmorRule::Percent(pct) => {
                let blocked = raw.saturating_mul(pct.min(100)) / 100;
                raw - blocked
            }
        }
    }
}

/// Baseline stats for a tier before escalation scaling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierStats {
    pub health: u32,
    pub speed_multiplier: f32,
    pub armor: ArmorRule,
    /// Hitbox side length
    pub size: f32,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Regular, Tier::Flying, Tier::Armored, Tier::Boss];

    pub fn stats(self) -> TierStats {
        match self {
            Tier::Regular => TierStats {
                health: 2,
                speed_multiplier: 1.0,
                armor: ArmorRule::None,
                size: 30.0,
            },
            Tier::Flying => TierStats {
                health: 1,
                speed_multiplier: 1.5,
                armor: ArmorRule::None,
                size: 30.0,
            },
            Tier::Armored => TierStats {
                health: 4,
                speed_multiplier: 1.0,
                armor: ArmorRule::Percent(50),
                size: 45.0,
            },
            Tier::Boss => TierStats {
                health: 10,
                speed_multiplier: 1.0,
                armor: ArmorRule::None,
                size: 60.0,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Regular => "Regular",
            Tier::Flying => "Flying",
            Tier::Armored => "Armored",
            Tier::Boss => "Boss",
        }
    }
}

/// Forced displacement overriding pursuit
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Knockback {
    /// Distance still to travel
    pub remaining: f32,
    /// Unit direction of travel
    pub direction: Vec2,
}

impl Knockback {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }
}

/// An enemy pursuing the avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: EntityId,
    pub tier: Tier,
    pub pos: Vec2,
    pub health: u32,
    pub max_health: u32,
    /// Pursuit speed in pixels per tick (before the boss pursuit bonus)
    pub speed: f32,
    pub armor: ArmorRule,
    pub knockback: Knockback,
    pub facing_left: bool,
    /// Escalation level this combatant was spawned at (bosses only)
    pub escalation_level: u32,
    /// Visual scale; also scales the hitbox
    pub scale: f32,
    /// Ticks since the last special attack
    pub attack_timer: u32,
}

impl Combatant {
    /// Spawn a combatant with baseline tier stats
    pub fn new(id: EntityId, tier: Tier, pos: Vec2, base_speed: f32) -> Self {
        let stats = tier.stats();
        Self {
            id,
            tier,
            pos,
            health: stats.health,
            max_health: stats.health,
            speed: base_speed * stats.speed_multiplier,
            armor: stats.armor,
            knockback: Knockback::default(),
            facing_left: false,
            escalation_level: 0,
            scale: 1.0,
            attack_timer: 0,
        }
    }

    /// Spawn a boss scaled to the given escalation level
    pub fn boss(id: EntityId, pos: Vec2, base_speed: f32, level: u32) -> Self {
        let mut boss = Self::new(id, Tier::Boss, pos, base_speed);
        let health = boss.max_health + BOSS_HEALTH_PER_LEVEL * level;
        let slowdown = (1.0 - BOSS_SLOWDOWN_PER_LEVEL * level as f32).max(BOSS_MIN_SPEED_FACTOR);
        boss.health = health;
        boss.max_health = health;
        boss.speed *= slowdown;
        boss.escalation_level = level;
        boss.scale = 1.0 + BOSS_SCALE_PER_LEVEL * level as f32;
        boss
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    #[inline]
    pub fn is_boss(&self) -> bool {
        self.tier == Tier::Boss
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::square(self.pos, self.tier.stats().size * self.scale)
    }

    /// Move one tick: consume knockback first, otherwise chase `target`
    pub fn advance(&mut self, target: Vec2, knockback_speed: f32) {
        if self.knockback.is_active() {
            let step = knockback_speed.min(self.knockback.remaining);
            self.knockback.remaining -= step;
            self.pos += self.knockback.direction * step;
            self.facing_left = self.knockback.direction.x < 0.0;
            return;
        }

        let speed = match self.tier {
            Tier::Boss => self.speed * BOSS_PURSUIT_BONUS,
            _ => self.speed,
        };
        self.facing_left = target.x - self.pos.x < 0.0;
        if let Some(dir) = direction_to(self.pos, target) {
            self.pos += dir * speed;
        }
    }

    /// Apply a hit. Returns true only on the call that drops health to zero.
    pub fn apply_damage(&mut self, raw: u32, ignore_armor: bool) -> bool {
        if !self.is_alive() {
            return false;
        }
        let effective = if ignore_armor {
            raw
        } else {
            self.armor.mitigate(raw)
        };
        self.health = self.health.saturating_sub(effective);
        self.health == 0
    }

    /// Push away from `source`. Coincident positions leave the state untouched.
    pub fn apply_knockback(&mut self, source: Vec2, distance: f32) {
        if let Some(direction) = direction_to(source, self.pos) {
            self.knockback = Knockback {
                remaining: distance.max(0.0),
                direction,
            };
        }
    }

    /// Advance the special-attack timer; true when an attack is due
    pub fn tick_attack(&mut self, interval: u32) -> bool {
        if self.tier != Tier::Boss || interval == 0 {
            return false;
        }
        self.attack_timer += 1;
        if self.attack_timer >= interval {
            self.attack_timer = 0;
            return true;
        }
        false
    }

    /// Ring of projectiles radiating from the boss at even angular steps
    pub fn special_attack(&self, count: u32, speed: f32, size: f32) -> Vec<Projectile> {
        if self.tier != Tier::Boss || count == 0 {
            return Vec::new();
        }
        let step = std::f32::consts::TAU / count as f32;
        (0..count)
            .map(|i| {
                let vel = from_angle(step * i as f32, speed);
                Projectile::linear(self.pos, vel, size).with_source(self.id)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lethal_reported_once() {
        let mut c = Combatant::new(1, Tier::Regular, Vec2::ZERO, 1.0);
        assert_eq!(c.health, 2);
        assert!(!c.apply_damage(1, false));
        assert_eq!(c.health, 1);
        assert!(c.apply_damage(1, false));
        assert_eq!(c.health, 0);
        assert!(!c.apply_damage(1, false));
        assert_eq!(c.health, 0);
    }

    #[test]
    fn test_overkill_clamps() {
        let mut c = Combatant::new(1, Tier::Flying, Vec2::ZERO, 1.0);
        assert!(c.apply_damage(50, false));
        assert_eq!(c.health, 0);
    }

    #[test]
    fn test_armor_percent() {
        let mut c = Combatant::new(1, Tier::Armored, Vec2::ZERO, 1.0);
        assert_eq!(c.health, 4);
        // 1 damage: half of 1 rounds down to 0 blocked
        c.apply_damage(1, false);
        assert_eq!(c.health, 3);
        // 2 damage: 1 blocked
        c.apply_damage(2, false);
        assert_eq!(c.health, 2);
        // Piercing ignores armor
        c.apply_damage(2, true);
        assert_eq!(c.health, 0);
    }

    #[test]
    fn test_armor_flat_floor() {
        assert_eq!(ArmorRule::Flat(2).mitigate(1), 0);
        assert_eq!(ArmorRule::Flat(2).mitigate(5), 3);
        assert_eq!(ArmorRule::Percent(100).mitigate(7), 0);
        assert_eq!(ArmorRule::Percent(250).mitigate(7), 0);
    }

    #[test]
    fn test_pursuit() {
        let mut c = Combatant::new(1, Tier::Regular, Vec2::new(10.0, 0.0), 1.0);
        c.advance(Vec2::ZERO, 5.0);
        assert!((c.pos.x - 9.0).abs() < 1e-6);
        assert!(c.facing_left);

        let mut f = Combatant::new(2, Tier::Flying, Vec2::new(0.0, 0.0), 1.0);
        f.advance(Vec2::new(10.0, 0.0), 5.0);
        assert!((f.pos.x - 1.5).abs() < 1e-6);
        assert!(!f.facing_left);
    }

    #[test]
    fn test_facing_uses_delta_before_step() {
        // Overshoots the target this tick but was heading right
        let mut c = Combatant::new(1, Tier::Regular, Vec2::ZERO, 1.0);
        c.advance(Vec2::new(0.5, 0.0), 5.0);
        assert!(c.pos.x > 0.5);
        assert!(!c.facing_left);
    }

    #[test]
    fn test_pursuit_at_target_is_still() {
        let mut c = Combatant::new(1, Tier::Regular, Vec2::new(5.0, 5.0), 1.0);
        c.advance(Vec2::new(5.0, 5.0), 5.0);
        assert_eq!(c.pos, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_knockback_consumes_distance() {
        let mut c = Combatant::new(1, Tier::Regular, Vec2::new(10.0, 0.0), 1.0);
        c.apply_knockback(Vec2::ZERO, 12.0);
        c.advance(Vec2::ZERO, 5.0);
        c.advance(Vec2::ZERO, 5.0);
        c.advance(Vec2::ZERO, 5.0);
        assert!((c.pos.x - 22.0).abs() < 1e-5);
        assert!(!c.knockback.is_active());
        // Pursuit resumes
        c.advance(Vec2::ZERO, 5.0);
        assert!((c.pos.x - 21.0).abs() < 1e-5);
    }

    #[test]
    fn test_knockback_zero_distance_source_ignored() {
        let mut c = Combatant::new(1, Tier::Regular, Vec2::new(4.0, 4.0), 1.0);
        c.apply_knockback(Vec2::new(4.0, 4.0), 80.0);
        assert!(!c.knockback.is_active());
    }

    #[test]
    fn test_boss_scaling() {
        let b0 = Combatant::boss(1, Vec2::ZERO, 1.0, 0);
        assert_eq!(b0.max_health, 10);
        let b2 = Combatant::boss(2, Vec2::ZERO, 1.0, 2);
        assert_eq!(b2.max_health, 20);
        assert_eq!(b2.health, 20);
        assert!(b2.speed < b0.speed);
        assert!(b2.scale > b0.scale);

        let b20 = Combatant::boss(3, Vec2::ZERO, 1.0, 20);
        assert!((b20.speed - BOSS_MIN_SPEED_FACTOR).abs() < 1e-6);
    }

    #[test]
    fn test_boss_pursuit_bonus() {
        let mut b = Combatant::boss(1, Vec2::new(100.0, 0.0), 1.0, 0);
        b.advance(Vec2::ZERO, 5.0);
        assert!((b.pos.x - (100.0 - BOSS_PURSUIT_BONUS)).abs() < 1e-5);
    }

    #[test]
    fn test_special_attack_ring() {
        let b = Combatant::boss(7, Vec2::new(50.0, 50.0), 1.0, 0);
        let ring = b.special_attack(8, 5.0, 15.0);
        assert_eq!(ring.len(), 8);
        for p in &ring {
            assert_eq!(p.pos, b.pos);
            assert!((p.vel.length() - 5.0).abs() < 1e-5);
            assert_eq!(p.source, Some(7));
        }
        // First shot points along +x, third along +y (45 degree steps)
        assert!((ring[0].vel.x - 5.0).abs() < 1e-5);
        assert!((ring[2].vel.y - 5.0).abs() < 1e-5);

        let grunt = Combatant::new(8, Tier::Regular, Vec2::ZERO, 1.0);
        assert!(grunt.special_attack(8, 5.0, 15.0).is_empty());
    }

    #[test]
    fn test_attack_timer() {
        let mut b = Combatant::boss(1, Vec2::ZERO, 1.0, 0);
        assert!(!b.tick_attack(3));
        assert!(!b.tick_attack(3));
        assert!(b.tick_attack(3));
        assert_eq!(b.attack_timer, 0);
        assert!(!b.tick_attack(0));
    }
}
