//! The player-controlled avatar

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Hitbox;
use super::projectile::{Behavior, Projectile, ProjectileKind};
use super::upgrade::UpgradeOption;
use crate::consts::XP_PER_LEVEL_SQ;
use crate::tuning::Tuning;
use crate::{angle_to, from_angle};

/// Animation state exposed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionState {
    #[default]
    Idle,
    Run,
}

/// Pressed-direction sample; each axis is independent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// Per-axis direction in screen space (+y is down).
    ///
    /// Diagonals are not normalized unless asked, so up+left moves a full step
    /// on both axes.
    pub fn to_vector(self, normalize: bool) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.left {
            v.x -= 1.0;
        }
        if self.right {
            v.x += 1.0;
        }
        if self.up {
            v.y -= 1.0;
        }
        if self.down {
            v.y += 1.0;
        }
        if normalize { v.normalize_or_zero() } else { v }
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    pub speed: f32,
    pub size: f32,
    pub health: u32,
    pub max_health: u32,
    pub xp: u32,
    pub level: u32,
    pub facing_left: bool,
    pub motion: MotionState,

    // === Weapon ===
    /// Ticks since the last shot, saturating at `fire_cooldown`
    pub fire_timer: u32,
    pub fire_cooldown: u32,
    pub bullet_count: u32,
    pub bullet_speed: f32,
    pub bullet_size: f32,
    pub spread_degrees: f32,
    pub projectile_kind: ProjectileKind,
    pub armor_piercing: bool,
    /// Live projectiles, including boss shockwaves
    pub projectiles: Vec<Projectile>,
}

impl Avatar {
    /// Fresh avatar at the arena center
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.arena_width / 2.0, tuning.arena_height / 2.0),
            speed: tuning.player_speed,
            size: tuning.player_size,
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            xp: 0,
            level: 1,
            facing_left: false,
            motion: MotionState::Idle,
            fire_timer: 0,
            fire_cooldown: tuning.fire_cooldown_ticks,
            bullet_count: 1,
            bullet_speed: tuning.bullet_speed,
            bullet_size: tuning.bullet_size,
            spread_degrees: tuning.spread_degrees,
            projectile_kind: ProjectileKind::Standard,
            armor_piercing: false,
            projectiles: Vec::new(),
        }
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::square(self.pos, self.size)
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Move by `direction * speed`, clamped into the arena
    pub fn apply_movement_intent(&mut self, direction: Vec2, width: f32, height: f32) {
        let delta = direction * self.speed;
        self.pos = (self.pos + delta).clamp(Vec2::ZERO, Vec2::new(width, height));

        self.motion = if delta == Vec2::ZERO {
            MotionState::Idle
        } else {
            MotionState::Run
        };
        if delta.x < 0.0 {
            self.facing_left = true;
        } else if delta.x > 0.0 {
            self.facing_left = false;
        }
    }

    pub fn tick_cooldown(&mut self) {
        if self.fire_timer < self.fire_cooldown {
            self.fire_timer += 1;
        }
    }

    #[inline]
    pub fn can_fire(&self) -> bool {
        self.fire_timer >= self.fire_cooldown
    }

    /// Fire a bundle toward `target`. Returns how many projectiles were created.
    ///
    /// Nothing happens (and the cooldown is kept) while reloading or when the
    /// target sits exactly on the avatar.
    pub fn fire(&mut self, target: Vec2, tuning: &Tuning) -> usize {
        if !self.can_fire() || target == self.pos {
            return 0;
        }

        let base = angle_to(self.pos, target);
        let count = self.bullet_count.max(1);
        let mid = (count - 1) as f32 / 2.0;
        let spread = self.spread_degrees.to_radians();

        for i in 0..count {
            let angle = base + spread * (i as f32 - mid);
            let vel = from_angle(angle, self.bullet_speed);
            let behavior = match self.projectile_kind {
                ProjectileKind::Standard => Behavior::Linear,
                ProjectileKind::Homing => Behavior::Homing {
                    target: None,
                    strength: tuning.homing_strength,
                },
                ProjectileKind::Explosive => Behavior::Explosive {
                    radius: tuning.explosion_radius,
                    detonated: false,
                },
            };
            self.projectiles
                .push(Projectile::new(self.pos, vel, self.bullet_size, behavior));
        }

        self.fire_timer = 0;
        count as usize
    }

    pub fn apply_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn grant_experience(&mut self, amount: u32) {
        self.xp = self.xp.saturating_add(amount);
    }

    /// Experience threshold for leaving the current level
    pub fn xp_for_next_level(&self) -> u32 {
        self.level.saturating_mul(self.level).saturating_mul(XP_PER_LEVEL_SQ)
    }

    pub fn ready_to_level(&self) -> bool {
        self.xp >= self.xp_for_next_level()
    }

    pub fn level_up(&mut self) {
        self.level += 1;
    }

    /// Apply one upgrade choice
    pub fn apply_upgrade(&mut self, option: UpgradeOption) {
        match option {
            UpgradeOption::HomingBullets => self.projectile_kind = ProjectileKind::Homing,
            UpgradeOption::ExplosiveRounds => self.projectile_kind = ProjectileKind::Explosive,
            UpgradeOption::ArmorPiercing => self.armor_piercing = true,
            UpgradeOption::RapidFire => self.fire_cooldown = (self.fire_cooldown / 2).max(1),
            UpgradeOption::HealthBoost => {
                self.max_health += 2;
                self.health += 2;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_avatar(tuning: &Tuning) -> Avatar {
        let mut a = Avatar::new(tuning);
        a.fire_timer = a.fire_cooldown;
        a
    }

    #[test]
    fn test_movement_clamped_to_arena() {
        let tuning = Tuning::default();
        let mut a = Avatar::new(&tuning);
        a.pos = Vec2::new(1.0, 699.0);
        a.apply_movement_intent(Vec2::new(-1.0, 1.0), 1200.0, 700.0);
        assert_eq!(a.pos, Vec2::new(0.0, 700.0));
        assert!(a.facing_left);
        assert_eq!(a.motion, MotionState::Run);

        a.apply_movement_intent(Vec2::ZERO, 1200.0, 700.0);
        assert_eq!(a.motion, MotionState::Idle);
        assert!(a.facing_left);
    }

    #[test]
    fn test_diagonal_not_normalized_by_default() {
        let intent = MoveIntent {
            up: true,
            left: true,
            ..Default::default()
        };
        assert_eq!(intent.to_vector(false), Vec2::new(-1.0, -1.0));
        assert!((intent.to_vector(true).length() - 1.0).abs() < 1e-6);

        let opposed = MoveIntent {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(opposed.to_vector(true), Vec2::ZERO);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let tuning = Tuning::default();
        let mut a = Avatar::new(&tuning);
        a.fire_timer = 5;
        assert_eq!(a.fire(Vec2::new(0.0, 0.0), &tuning), 0);
        assert!(a.projectiles.is_empty());
        assert_eq!(a.fire_timer, 5);

        for _ in 0..100 {
            a.tick_cooldown();
        }
        assert_eq!(a.fire_timer, a.fire_cooldown);
        assert_eq!(a.fire(Vec2::new(0.0, 0.0), &tuning), 1);
        assert_eq!(a.fire_timer, 0);
    }

    #[test]
    fn test_fire_at_self_is_noop() {
        let tuning = Tuning::default();
        let mut a = ready_avatar(&tuning);
        let pos = a.pos;
        assert_eq!(a.fire(pos, &tuning), 0);
        assert!(a.can_fire());
    }

    #[test]
    fn test_multishot_symmetric() {
        let tuning = Tuning::default();
        let mut a = ready_avatar(&tuning);
        a.bullet_count = 3;
        let target = a.pos + Vec2::new(100.0, 0.0);
        assert_eq!(a.fire(target, &tuning), 3);

        let angles: Vec<f32> = a.projectiles.iter().map(|p| p.vel.y.atan2(p.vel.x)).collect();
        let step = 10f32.to_radians();
        assert!((angles[0] + step).abs() < 1e-5);
        assert!(angles[1].abs() < 1e-5);
        assert!((angles[2] - step).abs() < 1e-5);
        for p in &a.projectiles {
            assert!((p.vel.length() - a.bullet_speed).abs() < 1e-4);
        }
    }

    #[test]
    fn test_fire_uses_current_kind() {
        let tuning = Tuning::default();
        let mut a = ready_avatar(&tuning);
        a.apply_upgrade(UpgradeOption::ExplosiveRounds);
        a.fire(Vec2::ZERO, &tuning);
        assert_eq!(a.projectiles[0].kind(), ProjectileKind::Explosive);
    }

    #[test]
    fn test_damage_clamps() {
        let tuning = Tuning::default();
        let mut a = Avatar::new(&tuning);
        a.apply_damage(3);
        assert_eq!(a.health, 2);
        a.apply_damage(10);
        assert_eq!(a.health, 0);
        assert!(a.is_dead());
    }

    #[test]
    fn test_level_threshold() {
        let tuning = Tuning::default();
        let mut a = Avatar::new(&tuning);
        assert_eq!(a.xp_for_next_level(), 5);
        a.grant_experience(4);
        assert!(!a.ready_to_level());
        a.grant_experience(1);
        assert!(a.ready_to_level());
        a.level_up();
        assert_eq!(a.xp_for_next_level(), 20);
        assert!(!a.ready_to_level());
    }

    #[test]
    fn test_upgrades() {
        let tuning = Tuning::default();
        let mut a = Avatar::new(&tuning);

        a.apply_upgrade(UpgradeOption::RapidFire);
        assert_eq!(a.fire_cooldown, 10);
        for _ in 0..10 {
            a.apply_upgrade(UpgradeOption::RapidFire);
        }
        assert_eq!(a.fire_cooldown, 1);

        a.apply_upgrade(UpgradeOption::HealthBoost);
        assert_eq!(a.max_health, 7);
        assert_eq!(a.health, 7);

        a.apply_upgrade(UpgradeOption::ArmorPiercing);
        assert!(a.armor_piercing);

        a.apply_upgrade(UpgradeOption::HomingBullets);
        assert_eq!(a.projectile_kind, ProjectileKind::Homing);
    }
}
