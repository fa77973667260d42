//! Data-driven game balance
//!
//! Every gameplay constant lives here so a host can ship alternate balance
//! files without touching the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::REFERENCE_FRAME_RATE;
use crate::sim::AsteroidSize;

/// How ship velocity damping relates to the frame time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DampingMode {
    /// Multiply by `damping` once per tick, whatever the tick length.
    /// Decelerates harder at low frame rates.
    PerTick,
    /// Multiply by `damping ^ (dt * 60)`. Identical to `PerTick` at 60 Hz and
    /// independent of frame rate otherwise.
    #[default]
    Exponential,
}

/// Balance constants for ships, projectiles and asteroids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ship ===
    /// Thrust acceleration (units/s²)
    pub ship_acceleration: f32,
    /// Velocity retained per reference tick
    pub ship_damping: f32,
    pub damping_mode: DampingMode,
    /// Render scale applied to the ship footprint
    pub ship_scale: f32,
    /// Unscaled ship sprite size
    pub ship_footprint: Vec2,
    /// Health at round start
    pub starting_health: u32,

    // === Weapons ===
    /// Minimum seconds between shots
    pub fire_cooldown: f32,
    /// Projectile speed (units/s)
    pub projectile_speed: f32,
    /// Seconds a projectile lives before expiring
    pub projectile_lifetime: f32,
    /// Projectile collision size
    pub projectile_footprint: Vec2,
    /// Live projectiles per ship; firing is suppressed at the cap
    pub max_projectiles: usize,

    // === Asteroids ===
    pub huge_footprint: Vec2,
    pub large_footprint: Vec2,
    pub medium_footprint: Vec2,
    /// Fraction of the sprite footprint used for collision
    pub asteroid_hitbox_scale: f32,
    /// Max absolute velocity component of a freshly spawned asteroid
    pub asteroid_max_speed: f32,
    /// Velocity multiplier for split fragments
    pub split_speed_factor: f32,

    // === Round ===
    /// Huge asteroids per wave
    pub wave_size: usize,
    /// Health granted to every ship when a wave is cleared
    pub wave_health_bonus: u32,
    /// Score per asteroid destroyed by a projectile
    pub points_per_asteroid: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ship_acceleration: 500.0,
            ship_damping: 0.95,
            damping_mode: DampingMode::Exponential,
            ship_scale: 0.4,
            ship_footprint: Vec2::new(64.0, 64.0),
            starting_health: 3,

            fire_cooldown: 0.2,
            projectile_speed: 600.0,
            projectile_lifetime: 1.5,
            projectile_footprint: Vec2::new(8.0, 8.0),
            max_projectiles: 16,

            huge_footprint: Vec2::new(120.0, 120.0),
            large_footprint: Vec2::new(80.0, 80.0),
            medium_footprint: Vec2::new(48.0, 48.0),
            asteroid_hitbox_scale: 0.6,
            asteroid_max_speed: 100.0,
            split_speed_factor: 1.5,

            wave_size: 4,
            wave_health_bonus: 1,
            points_per_asteroid: 10,
        }
    }
}

impl Tuning {
    /// Sprite footprint for an asteroid size class
    pub fn asteroid_footprint(&self, size: AsteroidSize) -> Vec2 {
        match size {
            AsteroidSize::Huge => self.huge_footprint,
            AsteroidSize::Large => self.large_footprint,
            AsteroidSize::Medium => self.medium_footprint,
        }
    }

    /// Ship footprint after render scale
    pub fn ship_scaled_footprint(&self) -> Vec2 {
        self.ship_footprint * self.ship_scale
    }

    /// Velocity multiplier to apply for a frame of length `dt`
    pub fn damping_factor(&self, dt: f32) -> f32 {
        match self.damping_mode {
            DampingMode::PerTick => self.ship_damping,
            DampingMode::Exponential => self.ship_damping.powf(dt * REFERENCE_FRAME_RATE),
        }
    }

    /// Returns the name of the first field that cannot produce a sane simulation
    pub fn first_invalid_field(&self) -> Option<&'static str> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let positive_size = |v: Vec2| positive(v.x) && positive(v.y);

        if !self.ship_acceleration.is_finite() || self.ship_acceleration < 0.0 {
            return Some("ship_acceleration");
        }
        if !(self.ship_damping.is_finite() && (0.0..=1.0).contains(&self.ship_damping)) {
            return Some("ship_damping");
        }
        if !positive(self.ship_scale) {
            return Some("ship_scale");
        }
        if !positive_size(self.ship_footprint) {
            return Some("ship_footprint");
        }
        if !positive_size(self.projectile_footprint) {
            return Some("projectile_footprint");
        }
        if !positive_size(self.huge_footprint)
            || !positive_size(self.large_footprint)
            || !positive_size(self.medium_footprint)
        {
            return Some("asteroid_footprint");
        }
        if !positive(self.asteroid_hitbox_scale) {
            return Some("asteroid_hitbox_scale");
        }
        if !self.asteroid_max_speed.is_finite() || self.asteroid_max_speed < 0.0 {
            return Some("asteroid_max_speed");
        }
        if !self.fire_cooldown.is_finite() || self.fire_cooldown < 0.0 {
            return Some("fire_cooldown");
        }
        if !self.projectile_speed.is_finite() || self.projectile_speed < 0.0 {
            return Some("projectile_speed");
        }
        if !positive(self.projectile_lifetime) {
            return Some("projectile_lifetime");
        }
        if !self.split_speed_factor.is_finite() || self.split_speed_factor < 0.0 {
            return Some("split_speed_factor");
        }
        if self.starting_health == 0 {
            return Some("starting_health");
        }
        if self.wave_size == 0 {
            return Some("wave_size");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(Tuning::default().first_invalid_field(), None);
    }

    #[test]
    fn test_exponential_matches_per_tick_at_reference_rate() {
        let exp = Tuning::default();
        let per_tick = Tuning {
            damping_mode: DampingMode::PerTick,
            ..Tuning::default()
        };
        let dt = 1.0 / REFERENCE_FRAME_RATE;
        assert!((exp.damping_factor(dt) - per_tick.damping_factor(dt)).abs() < 1e-6);
    }

    #[test]
    fn test_exponential_damping_is_frame_rate_independent() {
        let tuning = Tuning::default();
        // Two 120 Hz frames decay as much as one 60 Hz frame
        let half = tuning.damping_factor(1.0 / 120.0);
        let full = tuning.damping_factor(1.0 / 60.0);
        assert!((half * half - full).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_damping_is_reported() {
        let tuning = Tuning {
            ship_damping: 1.5,
            ..Tuning::default()
        };
        assert_eq!(tuning.first_invalid_field(), Some("ship_damping"));
    }
}
