//! Toroidal arena and axis-aligned collision boxes

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::wrap_coordinate;

/// The wrap-around play surface, `[0, width) x [0, height)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Point at fractional coordinates (0..1 on each axis)
    pub fn at_fraction(&self, fx: f32, fy: f32) -> Vec2 {
        Vec2::new(self.width * fx, self.height * fy)
    }

    /// Wrap a position back onto the arena (exiting one edge re-enters the opposite)
    pub fn wrap(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            wrap_coordinate(pos.x, self.width),
            wrap_coordinate(pos.y, self.height),
        )
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        (0.0..self.width).contains(&pos.x) && (0.0..self.height).contains(&pos.y)
    }

    /// Uniformly random point inside the arena
    pub fn random_point<R: Rng>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.random_range(0.0..self.width),
            rng.random_range(0.0..self.height),
        )
    }
}

/// Axis-aligned box used for overlap tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap; boxes that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}
