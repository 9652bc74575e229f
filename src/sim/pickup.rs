//! Currency drops left behind by defeated combatants

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Hitbox;

/// Upward velocity a pickup pops with
pub const POP_VELOCITY: f32 = -2.0;
pub const GRAVITY: f32 = 0.1;
pub const FRICTION: f32 = 0.95;
pub const BOUNCE_FACTOR: f32 = 0.5;
/// Below this speed a landing pickup stops instead of bouncing
pub const REST_SPEED: f32 = 0.5;
/// Max random offset from the drop point on each axis
pub const SPAWN_JITTER: f32 = 10.0;

/// Ticks between animation steps
const ANIM_PERIOD: u32 = 5;
const PULSE_STEP: f32 = 0.02;
const PULSE_MIN: f32 = 0.8;
const PULSE_MAX: f32 = 1.2;
const SPIN_STEP_DEG: f32 = 5.0;

/// Presentation-only animation phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickupPhase {
    /// Pulse scale in [0.8, 1.2]
    pub scale: f32,
    /// Rotation in degrees [0, 360)
    pub angle: f32,
}

/// A coin granting experience on contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub pos: Vec2,
    pub vel_y: f32,
    /// Height the pickup bounces on
    pub ground_y: f32,
    pub size: f32,
    pub phase: PickupPhase,
    pulse_dir: f32,
    anim_timer: u32,
}

impl Pickup {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            vel_y: POP_VELOCITY,
            ground_y: pos.y,
            size,
            phase: PickupPhase {
                scale: 1.0,
                angle: 0.0,
            },
            pulse_dir: PULSE_STEP,
            anim_timer: 0,
        }
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::square(self.pos, self.size)
    }

    /// Hop physics plus the pulse/spin animation
    pub fn advance(&mut self) {
        self.vel_y += GRAVITY;
        self.pos.y += self.vel_y;
        self.vel_y *= FRICTION;

        if self.pos.y > self.ground_y {
            self.pos.y = self.ground_y;
            if self.vel_y.abs() > REST_SPEED {
                self.vel_y = -self.vel_y * BOUNCE_FACTOR;
            } else {
                self.vel_y = 0.0;
            }
        }

        self.anim_timer += 1;
        if self.anim_timer >= ANIM_PERIOD {
            self.anim_timer = 0;
            self.phase.scale += self.pulse_dir;
            if self.phase.scale > PULSE_MAX || self.phase.scale < PULSE_MIN {
                self.pulse_dir = -self.pulse_dir;
                self.phase.scale = self.phase.scale.clamp(PULSE_MIN, PULSE_MAX);
            }
            self.phase.angle = (self.phase.angle + SPIN_STEP_DEG) % 360.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_up_then_settles() {
        let mut p = Pickup::new(Vec2::new(10.0, 100.0), 20.0);
        p.advance();
        assert!(p.pos.y < 100.0);

        for _ in 0..600 {
            p.advance();
            assert!(p.pos.y <= 100.0);
        }
        assert_eq!(p.pos.y, 100.0);
        assert_eq!(p.vel_y, 0.0);
        assert_eq!(p.pos.x, 10.0);
    }

    #[test]
    fn test_animation_phase_bounded() {
        let mut p = Pickup::new(Vec2::ZERO, 20.0);
        for _ in 0..2000 {
            p.advance();
            assert!(p.phase.scale >= PULSE_MIN && p.phase.scale <= PULSE_MAX);
            assert!(p.phase.angle >= 0.0 && p.phase.angle < 360.0);
        }
    }

    #[test]
    fn test_animation_steps_every_period() {
        let mut p = Pickup::new(Vec2::ZERO, 20.0);
        for _ in 0..4 {
            p.advance();
        }
        assert_eq!(p.phase.angle, 0.0);
        p.advance();
        assert_eq!(p.phase.angle, 5.0);
    }
}
