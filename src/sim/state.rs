//! Entities and session state
//!
//! The session owns everything a round needs: ships (which own their
//! projectiles), the asteroid pool, the live-asteroid list and the RNG.
//! Hosts hold the `Session` and pass it to [`super::tick`] once per frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::{Aabb, Arena};
use super::pool::{PoolHandle, PooledRegistry};
use crate::consts::MAX_PLAYERS;
use crate::settings::{Settings, SettingsError};
use crate::tuning::Tuning;
use crate::{heading_to_rotation, rotation_to_direction};

/// Where the session is in the round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundMode {
    /// Start screen, waiting for the start signal
    #[default]
    NotStarted,
    /// Active round
    Playing,
    /// A ship ran out of health; waiting for restart
    GameOver,
}

/// Local player slot; decides which controls drive a ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

/// Per-ship control state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl ShipIntent {
    /// Raw (unnormalized) thrust direction. Screen space, so "up" is -y.
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// Asteroid size class, largest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AsteroidSize {
    #[default]
    Huge,
    Large,
    Medium,
}

impl AsteroidSize {
    /// Size of the fragments this asteroid splits into; `None` for the smallest class
    pub fn next_smaller(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Huge => Some(AsteroidSize::Large),
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => None,
        }
    }
}

/// A pooled asteroid. The pool owns the storage; the session's live list
/// decides whether it is in play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: AsteroidSize,
}

impl Asteroid {
    /// Overwrite every field; required after each acquire
    pub fn reset(&mut self, pos: Vec2, vel: Vec2, size: AsteroidSize) {
        self.pos = pos;
        self.vel = vel;
        self.size = size;
    }

    pub fn update(&mut self, dt: f32, arena: &Arena) {
        self.pos = arena.wrap(self.pos + self.vel * dt);
    }

    /// Collision box, shrunk relative to the sprite
    pub fn bounds(&self, tuning: &Tuning) -> Aabb {
        let footprint = tuning.asteroid_footprint(self.size) * tuning.asteroid_hitbox_scale;
        Aabb::from_center(self.pos, footprint)
    }

    /// Velocities of the outward fragment pair
    pub fn fragment_velocities(&self, factor: f32) -> [Vec2; 2] {
        [self.vel * factor, -self.vel * factor]
    }
}

/// A bullet travelling in a straight line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Fixed at spawn; determines travel direction
    pub rotation: f32,
    pub time_alive: f32,
}

impl Projectile {
    pub fn new(pos: Vec2, rotation: f32) -> Self {
        Self {
            pos,
            rotation,
            time_alive: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, speed: f32, arena: &Arena) {
        let dir = rotation_to_direction(self.rotation);
        self.pos = arena.wrap(self.pos + dir * speed * dt);
        self.time_alive += dt;
    }

    pub fn is_expired(&self, lifetime: f32) -> bool {
        self.time_alive > lifetime
    }

    pub fn bounds(&self, tuning: &Tuning) -> Aabb {
        Aabb::from_center(self.pos, tuning.projectile_footprint)
    }
}

/// A player ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub player: Player,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Sprite rotation (radians); retained while the ship is stationary
    pub rotation: f32,
    pub health: u32,
    /// Owned bullets, oldest first
    pub projectiles: Vec<Projectile>,
    pub time_since_last_shot: f32,
}

impl Ship {
    pub fn new(player: Player, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            player,
            pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            health: tuning.starting_health,
            projectiles: Vec::with_capacity(tuning.max_projectiles),
            time_since_last_shot: 0.0,
        }
    }

    /// Integrate one frame of intent: thrust, damping, motion, firing, and
    /// projectile aging.
    pub fn update(&mut self, intent: &ShipIntent, dt: f32, arena: &Arena, tuning: &Tuning) {
        let dir = intent.direction();
        if dir != Vec2::ZERO {
            self.vel += dir.normalize() * tuning.ship_acceleration * dt;
        }
        self.vel *= tuning.damping_factor(dt);

        self.pos += self.vel * dt;
        if self.vel.length_squared() > 0.0 {
            self.rotation = heading_to_rotation(self.vel);
        }
        self.pos = arena.wrap(self.pos);

        self.time_since_last_shot += dt;
        if intent.fire && self.time_since_last_shot >= tuning.fire_cooldown {
            self.fire(arena, tuning);
            self.time_since_last_shot = 0.0;
        }

        for projectile in &mut self.projectiles {
            projectile.update(dt, tuning.projectile_speed, arena);
        }
        self.projectiles
            .retain(|p| !p.is_expired(tuning.projectile_lifetime));
    }

    /// Spawn a projectile at the nose. Suppressed at the projectile cap.
    fn fire(&mut self, arena: &Arena, tuning: &Tuning) {
        if self.projectiles.len() >= tuning.max_projectiles {
            return;
        }
        let nose = rotation_to_direction(self.rotation) * (tuning.ship_footprint.y / 2.0);
        let muzzle = arena.wrap(self.pos + nose);
        self.projectiles.push(Projectile::new(muzzle, self.rotation));
    }

    pub fn bounds(&self, tuning: &Tuning) -> Aabb {
        Aabb::from_center(self.pos, tuning.ship_scaled_footprint())
    }

    /// Lose one health; never drops below zero
    pub fn take_hit(&mut self) {
        self.health = self.health.saturating_sub(1);
    }

    pub fn grant_health(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount);
    }

    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }
}

/// Complete simulation state for one process run
#[derive(Debug, Clone)]
pub struct Session {
    pub arena: Arena,
    pub tuning: Tuning,
    /// Seed the session was built with
    pub seed: u64,
    pub mode: RoundMode,
    /// Chosen on the start screen; fixed for the rest of the session
    pub multiplayer: bool,
    /// Active ships in player order (one or two)
    pub ships: Vec<Ship>,
    /// Score per player slot
    pub scores: [u64; MAX_PLAYERS],
    /// Wave number within the current round (1-based, 0 before the first round)
    pub wave: u32,
    /// Asteroid storage
    pub asteroid_pool: PooledRegistry<Asteroid>,
    /// Asteroids in play (unordered)
    pub live_asteroids: Vec<PoolHandle>,
    pub(crate) rng: Pcg32,
}

impl Session {
    /// New session on default settings
    pub fn new(seed: u64) -> Self {
        let settings = Settings::with_seed(seed);
        Self::build(&settings)
    }

    /// New session from validated settings
    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::build(settings))
    }

    fn build(settings: &Settings) -> Self {
        Self {
            arena: settings.arena(),
            tuning: settings.tuning.clone(),
            seed: settings.seed,
            mode: RoundMode::NotStarted,
            multiplayer: false,
            ships: Vec::with_capacity(MAX_PLAYERS),
            scores: [0; MAX_PLAYERS],
            wave: 0,
            asteroid_pool: PooledRegistry::new(),
            live_asteroids: Vec::new(),
            rng: Pcg32::seed_from_u64(settings.seed),
        }
    }

    /// Acquire a pooled asteroid, fully re-initialise it and put it in play
    pub fn spawn_asteroid(&mut self, size: AsteroidSize, pos: Vec2, vel: Vec2) -> PoolHandle {
        let handle = self.asteroid_pool.acquire();
        self.asteroid_pool[handle].reset(self.arena.wrap(pos), vel, size);
        self.live_asteroids.push(handle);
        handle
    }

    /// Take the asteroid at `live_index` out of play and return its storage.
    ///
    /// Swap-removes, so only indices at or above `live_index` change.
    pub fn despawn_asteroid(&mut self, live_index: usize) -> Asteroid {
        let handle = self.live_asteroids.swap_remove(live_index);
        let asteroid = self.asteroid_pool[handle];
        self.asteroid_pool.release(handle);
        asteroid
    }

    /// Release every live asteroid back to the pool
    pub fn clear_asteroids(&mut self) {
        for handle in self.live_asteroids.drain(..) {
            self.asteroid_pool.release(handle);
        }
    }

    /// Live asteroids, in live-list order
    pub fn asteroids(&self) -> impl Iterator<Item = &Asteroid> + '_ {
        self.live_asteroids
            .iter()
            .map(|handle| &self.asteroid_pool[*handle])
    }

    pub fn ship(&self, player: Player) -> Option<&Ship> {
        self.ships.iter().find(|s| s.player == player)
    }

    pub fn ship_mut(&mut self, player: Player) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|s| s.player == player)
    }

    pub fn score(&self, player: Player) -> u64 {
        self.scores[player.index()]
    }

    /// Leave the current round between frames and return to the start screen.
    /// The multiplayer choice can be made again.
    pub fn abandon(&mut self) {
        if self.mode == RoundMode::NotStarted {
            return;
        }
        log::info!("Round abandoned at wave {} (seed {})", self.wave, self.seed);
        self.clear_asteroids();
        self.ships.clear();
        self.scores = [0; MAX_PLAYERS];
        self.wave = 0;
        self.mode = RoundMode::NotStarted;
    }
}
