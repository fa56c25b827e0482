//! Axis-aligned box geometry
//!
//! Every body in the world is a box described by its center and full size,
//! Y pointing up. The player, platforms and collectibles all reduce to this
//! for collision purposes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A centered axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Box center
    pub center: Vec2,
    /// Full width and height
    pub size: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// A square box of side `side`
    pub fn square(center: Vec2, side: f32) -> Self {
        Self::new(center, Vec2::splat(side))
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.half_extents().x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.half_extents().x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents().y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y - self.half_extents().y
    }

    /// Strict horizontal overlap (touching edges do not count)
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.right() > other.left() && self.left() < other.right()
    }

    /// Strict vertical overlap (touching edges do not count)
    #[inline]
    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        self.top() > other.bottom() && self.bottom() < other.top()
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }
}
