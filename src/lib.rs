//! Horde Survivor - simulation core for a top-down survival arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, combat, spawning, progression)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second (one tick per rendered frame)
    pub const TICK_RATE: u32 = 60;
    /// Duration of one tick in seconds
    pub const TICK_DT: f32 = 1.0 / TICK_RATE as f32;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 1200.0;
    pub const ARENA_HEIGHT: f32 = 700.0;

    /// Experience needed per level, scaled by level squared
    pub const XP_PER_LEVEL_SQ: u32 = 5;
    /// Upgrade choices offered per level-up
    pub const UPGRADE_CHOICES: usize = 3;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Squared distance (cheap comparison key for nearest searches)
#[inline]
pub fn distance_sq(a: Vec2, b: Vec2) -> f32 {
    a.distance_squared(b)
}

/// Unit vector pointing from `from` toward `to`.
///
/// Returns `None` when the points coincide, which callers treat as
/// "no movement / no force this tick".
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Angle (radians) of the vector from `from` toward `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Vector of the given length pointing along `angle`
#[inline]
pub fn from_angle(angle: f32, length: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin()) * length
}
