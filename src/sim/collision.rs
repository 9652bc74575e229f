//! Overlap tests and nearest-entity queries
//!
//! Every entity collides as an axis-aligned box centered on its position.
//! Boxes that merely touch along an edge do not overlap.

use glam::Vec2;

use crate::distance_sq;

/// Axis-aligned hitbox centered on an entity position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub center: Vec2,
    pub half_extent: Vec2,
}

impl Hitbox {
    /// Square hitbox with the given side length
    pub fn square(center: Vec2, size: f32) -> Self {
        Self {
            center,
            half_extent: Vec2::splat(size / 2.0),
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extent
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extent
    }

    /// Strict overlap (shared edges are not a hit)
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }
}

/// Index of the position nearest to `origin` (by squared distance).
///
/// Ties keep the earliest entry so iteration order decides.
pub fn nearest_index<I>(origin: Vec2, positions: I) -> Option<usize>
where
    I: IntoIterator<Item = Vec2>,
{
    let mut best: Option<(usize, f32)> = None;
    for (i, pos) in positions.into_iter().enumerate() {
        let d = distance_sq(origin, pos);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}
