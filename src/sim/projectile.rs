//! Projectiles fired by the avatar (and boss shockwaves)
//!
//! Three behaviors share one struct: linear flight, homing toward the
//! nearest live combatant, and an explosive round that damages everything in
//! a radius on first impact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Hitbox, nearest_index};
use super::combatant::{Combatant, EntityId};
use crate::{direction_to, distance};

/// Projectile kind the avatar is currently firing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectileKind {
    #[default]
    Standard,
    Homing,
    Explosive,
}

impl ProjectileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectileKind::Standard => "Standard",
            ProjectileKind::Homing => "Homing",
            ProjectileKind::Explosive => "Explosive",
        }
    }
}

/// Per-kind flight and impact state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    Linear,
    Homing {
        /// Current target; re-validated every tick
        target: Option<EntityId>,
        /// Acceleration per tick toward the target
        strength: f32,
    },
    Explosive {
        radius: f32,
        detonated: bool,
    },
}

impl Behavior {
    pub fn kind(&self) -> ProjectileKind {
        match self {
            Behavior::Linear => ProjectileKind::Standard,
            Behavior::Homing { .. } => ProjectileKind::Homing,
            Behavior::Explosive { .. } => ProjectileKind::Explosive,
        }
    }
}

/// Area damage parameters for an explosive round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blast {
    pub damage: u32,
    pub knockback: f32,
    pub ignore_armor: bool,
}

/// A projectile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Hitbox side length
    pub size: f32,
    pub behavior: Behavior,
    /// Combatant that emitted this projectile; it never hits its source
    pub source: Option<EntityId>,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, size: f32, behavior: Behavior) -> Self {
        Self {
            pos,
            vel,
            size,
            behavior,
            source: None,
        }
    }

    pub fn linear(pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self::new(pos, vel, size, Behavior::Linear)
    }

    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    #[inline]
    pub fn kind(&self) -> ProjectileKind {
        self.behavior.kind()
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::square(self.pos, self.size)
    }

    /// Whether this projectile may strike `combatant`
    pub fn can_hit(&self, combatant: &Combatant) -> bool {
        combatant.is_alive() && self.source != Some(combatant.id)
    }

    /// Integrate one tick. Homing rounds steer toward a live combatant first.
    pub fn advance(&mut self, combatants: &[Combatant]) {
        let pos = self.pos;
        if let Behavior::Homing { target, strength } = &mut self.behavior {
            let live = || combatants.iter().filter(|c| c.is_alive());

            let mut current = target.and_then(|id| live().find(|c| c.id == id));
            if current.is_none() {
                current = nearest_index(pos, live().map(|c| c.pos)).and_then(|i| live().nth(i));
                if current.is_some() {
                    *target = current.map(|c| c.id);
                }
            }

            if let Some(dir) = current.and_then(|c| direction_to(pos, c.pos)) {
                self.vel += dir * *strength;
            }
        }
        self.pos += self.vel;
    }

    /// True once the projectile has left `[0, width] x [0, height]`
    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        self.pos.x < 0.0 || self.pos.x > width || self.pos.y < 0.0 || self.pos.y > height
    }

    /// True for an explosive round that has already gone off
    pub fn has_detonated(&self) -> bool {
        matches!(self.behavior, Behavior::Explosive { detonated: true, .. })
    }

    /// Damage and knock back every live combatant within the blast radius.
    ///
    /// The `struck` combatant is always caught in the blast, even when its
    /// center lies outside the radius. Only the first call on an explosive
    /// round has any effect. Returns the ids of combatants killed by this
    /// blast, in collection order.
    pub fn detonate(
        &mut self,
        combatants: &mut [Combatant],
        struck: Option<EntityId>,
        blast: Blast,
    ) -> Vec<EntityId> {
        let Behavior::Explosive { radius, detonated } = &mut self.behavior else {
            return Vec::new();
        };
        if *detonated {
            return Vec::new();
        }
        *detonated = true;

        let center = self.pos;
        let radius = *radius;
        let mut killed = Vec::new();
        for c in combatants.iter_mut().filter(|c| c.is_alive()) {
            if struck == Some(c.id) || distance(c.pos, center) <= radius {
                if c.apply_damage(blast.damage, blast.ignore_armor) {
                    killed.push(c.id);
                }
                c.apply_knockback(center, blast.knockback);
            }
        }
        killed
    }
}
