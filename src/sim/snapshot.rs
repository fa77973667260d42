//! Read-only view of a frame for renderers and HUDs

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{AsteroidSize, Player, RoundMode, Session};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidView {
    pub pos: Vec2,
    /// Asteroids are drawn unrotated
    pub rotation: f32,
    pub size: AsteroidSize,
    /// Sprite footprint for this size class
    pub footprint: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub rotation: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub player: Player,
    pub pos: Vec2,
    pub rotation: f32,
    pub scale: f32,
    pub health: u32,
    pub projectiles: Vec<ProjectileView>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub mode: RoundMode,
    pub multiplayer: bool,
    pub wave: u32,
    /// Score per active player, in player order
    pub scores: Vec<u64>,
    pub ships: Vec<ShipView>,
    pub asteroids: Vec<AsteroidView>,
    /// Pooled asteroid instances currently handed out
    pub pool_in_use: usize,
}

impl Session {
    /// Capture the state left by the last `tick`
    pub fn snapshot(&self) -> FrameSnapshot {
        let ships = self
            .ships
            .iter()
            .map(|ship| ShipView {
                player: ship.player,
                pos: ship.pos,
                rotation: ship.rotation,
                scale: self.tuning.ship_scale,
                health: ship.health,
                projectiles: ship
                    .projectiles
                    .iter()
                    .map(|p| ProjectileView {
                        pos: p.pos,
                        rotation: p.rotation,
                    })
                    .collect(),
            })
            .collect();

        let asteroids = self
            .asteroids()
            .map(|a| AsteroidView {
                pos: a.pos,
                rotation: 0.0,
                size: a.size,
                footprint: self.tuning.asteroid_footprint(a.size),
            })
            .collect();

        let players = if self.multiplayer { 2 } else { 1 };

        FrameSnapshot {
            mode: self.mode,
            multiplayer: self.multiplayer,
            wave: self.wave,
            scores: self.scores[..players].to_vec(),
            ships,
            asteroids,
            pool_in_use: self.asteroid_pool.in_use_count(),
        }
    }
}
