//! Per-frame simulation step and round lifecycle
//!
//! `tick` is the only entry point a host needs: it consumes one frame of input
//! and elapsed time and leaves the session in a consistent state for the
//! snapshot.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::state::{AsteroidSize, Player, RoundMode, Session, Ship, ShipIntent};
use crate::consts::MAX_PLAYERS;

/// Input for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Control state per player slot
    pub ships: [ShipIntent; MAX_PLAYERS],
    /// Start-screen multiplayer toggle (one-shot)
    pub toggle_multiplayer: bool,
    /// Start from the start screen, or restart after game over (one-shot)
    pub start: bool,
}

impl FrameInput {
    pub fn intent(&self, player: Player) -> &ShipIntent {
        &self.ships[player.index()]
    }
}

/// Names of the default bindings for a player slot. Hosts translate these
/// into [`ShipIntent`] flags; the simulation never sees devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlScheme {
    pub up: &'static str,
    pub down: &'static str,
    pub left: &'static str,
    pub right: &'static str,
    pub fire: &'static str,
}

impl ControlScheme {
    pub fn for_player(player: Player) -> Self {
        match player {
            Player::One => Self {
                up: "W",
                down: "S",
                left: "A",
                right: "D",
                fire: "Space",
            },
            Player::Two => Self {
                up: "Up",
                down: "Down",
                left: "Left",
                right: "Right",
                fire: "RightShift",
            },
        }
    }
}

/// Advance the session by one frame of `dt` seconds
pub fn tick(session: &mut Session, input: &FrameInput, dt: f32) {
    debug_assert!(dt >= 0.0, "negative frame time {dt}");

    match session.mode {
        RoundMode::NotStarted => {
            if input.toggle_multiplayer {
                session.multiplayer = !session.multiplayer;
                log::info!("Multiplayer {}", if session.multiplayer { "on" } else { "off" });
            }
            if input.start {
                start_round(session);
            }
            return;
        }
        RoundMode::GameOver => {
            if input.start {
                start_round(session);
            }
            return;
        }
        RoundMode::Playing => {}
    }

    for ship in &mut session.ships {
        let intent = input.intent(ship.player);
        ship.update(intent, dt, &session.arena, &session.tuning);
    }

    for handle in &session.live_asteroids {
        session.asteroid_pool[*handle].update(dt, &session.arena);
    }

    resolve_collisions(session);
    finish_frame(session);
}

/// Life-loss and wave-clear transitions after collisions are resolved
fn finish_frame(session: &mut Session) {
    if session.mode != RoundMode::Playing {
        return;
    }
    if session.ships.iter().any(Ship::is_destroyed) {
        session.mode = RoundMode::GameOver;
        return;
    }
    if session.live_asteroids.is_empty() {
        next_wave(session);
    }
}

/// Reset scores, ships and asteroids and enter `Playing`.
///
/// Used both from the start screen and to restart after game over; the
/// multiplayer choice is kept.
pub fn start_round(session: &mut Session) {
    session.clear_asteroids();
    session.scores = [0; MAX_PLAYERS];
    session.ships.clear();

    let arena = session.arena;
    if session.multiplayer {
        session.ships.push(Ship::new(Player::One, arena.at_fraction(0.4375, 0.5), &session.tuning));
        session.ships.push(Ship::new(Player::Two, arena.at_fraction(0.5625, 0.5), &session.tuning));
    } else {
        session.ships.push(Ship::new(Player::One, arena.at_fraction(0.5, 0.5), &session.tuning));
    }

    session.wave = 1;
    spawn_wave(session);
    session.mode = RoundMode::Playing;
    log::info!(
        "Round started ({} player{}, seed {})",
        session.ships.len(),
        if session.ships.len() == 1 { "" } else { "s" },
        session.seed
    );
}

/// Field cleared: spawn a fresh wave and reward every ship
fn next_wave(session: &mut Session) {
    session.wave += 1;
    spawn_wave(session);
    let bonus = session.tuning.wave_health_bonus;
    for ship in &mut session.ships {
        ship.grant_health(bonus);
    }
    log::info!("Wave {} begins", session.wave);
}

/// Spawn `wave_size` huge asteroids at random positions and velocities
pub fn spawn_wave(session: &mut Session) {
    let max_speed = session.tuning.asteroid_max_speed;
    for _ in 0..session.tuning.wave_size {
        let pos = session.arena.random_point(&mut session.rng);
        let vel = Vec2::new(
            session.rng.random_range(-max_speed..=max_speed),
            session.rng.random_range(-max_speed..=max_speed),
        );
        session.spawn_asteroid(AsteroidSize::Huge, pos, vel);
    }
    log::debug!(
        "Spawned wave of {} ({} pooled, {} in use)",
        session.tuning.wave_size,
        session.asteroid_pool.total_count(),
        session.asteroid_pool.in_use_count()
    );
}
