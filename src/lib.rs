//! Asteroid Blaster - simulation core for a wrap-around arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pooling, motion, collisions, round state)
//! - `settings`: Arena/seed configuration loaded from JSON
//! - `tuning`: Data-driven game balance

pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{Settings, SettingsError};
pub use tuning::{DampingMode, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default arena dimensions
    pub const DEFAULT_ARENA_WIDTH: f32 = 800.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 600.0;

    /// Frame rate the damping constant was authored against
    pub const REFERENCE_FRAME_RATE: f32 = 60.0;

    /// Local players sharing the arena
    pub const MAX_PLAYERS: usize = 2;

    /// Timestep used by the headless driver
    pub const DEMO_DT: f32 = 1.0 / 60.0;
}

/// Wrap a single coordinate into `[0, extent)`.
///
/// One step of `±extent` covers any per-frame motion at sane frame rates;
/// larger jumps fall back to a euclidean remainder.
#[inline]
pub fn wrap_coordinate(value: f32, extent: f32) -> f32 {
    let mut v = value;
    if v < 0.0 {
        v += extent;
    } else if v >= extent {
        v -= extent;
    }
    if v < 0.0 || v >= extent {
        v = v.rem_euclid(extent);
        // rem_euclid of a tiny negative rounds up to `extent`
        if v >= extent {
            v = 0.0;
        }
    }
    v
}

/// Sprite rotation for a heading. Sprites point "up", so the nose sits a
/// quarter turn from the +x axis.
#[inline]
pub fn heading_to_rotation(heading: Vec2) -> f32 {
    heading.y.atan2(heading.x) + std::f32::consts::FRAC_PI_2
}

/// Unit travel direction for a sprite rotation (inverse of [`heading_to_rotation`])
#[inline]
pub fn rotation_to_direction(rotation: f32) -> Vec2 {
    let angle = rotation - std::f32::consts::FRAC_PI_2;
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_coordinate_single_step() {
        assert_eq!(wrap_coordinate(-10.0, 800.0), 790.0);
        assert_eq!(wrap_coordinate(810.0, 800.0), 10.0);
        assert_eq!(wrap_coordinate(400.0, 800.0), 400.0);
    }

    #[test]
    fn test_wrap_coordinate_far_edge_is_excluded() {
        assert_eq!(wrap_coordinate(800.0, 800.0), 0.0);
        let v = wrap_coordinate(-1e-9, 800.0);
        assert!((0.0..800.0).contains(&v));
    }

    #[test]
    fn test_wrap_coordinate_large_jump() {
        let v = wrap_coordinate(2450.0, 800.0);
        assert!((v - 50.0).abs() < 1e-3);
        let v = wrap_coordinate(-1650.0, 800.0);
        assert!((v - 750.0).abs() < 1e-3);
    }

    #[test]
    fn test_rotation_roundtrip() {
        let heading = Vec2::new(3.0, -4.0);
        let dir = rotation_to_direction(heading_to_rotation(heading));
        assert!((dir - heading.normalize()).length() < 1e-5);
    }

    #[test]
    fn test_zero_rotation_points_up() {
        let dir = rotation_to_direction(0.0);
        assert!(dir.x.abs() < 1e-6);
        assert!((dir.y + 1.0).abs() < 1e-6);
    }
}
