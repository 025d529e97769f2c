//! Collision tests
//!
//! The black hole is a circle checked against the player's half-size; the
//! jellyfish are boxes checked against the player's box. Both tests are
//! strict: touching is not overlapping.

use glam::Vec2;

/// Axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn square(min: Vec2, side: f32) -> Self {
        Self::new(min, Vec2::splat(side))
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// True iff all four separating inequalities fail
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max().x
            && self.max().x > other.min.x
            && self.min.y < other.max().y
            && self.max().y > other.min.y
    }
}

/// Circle-circle overlap (strict)
#[inline]
pub fn circles_overlap(a_center: Vec2, a_radius: f32, b_center: Vec2, b_radius: f32) -> bool {
    a_center.distance(b_center) < a_radius + b_radius
}

/// Player box against the black hole, using half the player size as radius
pub fn player_hits_black_hole(player: &Aabb, hole_center: Vec2, hole_radius: f32) -> bool {
    circles_overlap(player.center(), player.size.x / 2.0, hole_center, hole_radius)
}
