//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time supplied by the caller only
//! - Seeded RNG only
//! - Single-threaded; one `tick` fully completes before a snapshot is taken
//! - No rendering or platform dependencies

pub mod arena;
pub mod collision;
pub mod pool;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use arena::{Aabb, Arena};
pub use collision::{CollisionReport, resolve_collisions};
pub use pool::{PoolHandle, PooledRegistry};
pub use snapshot::{AsteroidView, FrameSnapshot, ProjectileView, ShipView};
pub use state::{
    Asteroid, AsteroidSize, Player, Projectile, RoundMode, Session, Ship, ShipIntent,
};
pub use tick::{ControlScheme, FrameInput, spawn_wave, start_round, tick};
