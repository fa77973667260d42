//! Collision and split resolution
//!
//! Runs once per frame after motion integration. Each live asteroid resolves
//! at most one event per frame: a ship impact (which pre-empts bullet hits) or
//! a single projectile hit, in player order.
//!
//! The live list is walked from the back. Removal is a swap-remove, which
//! only moves elements that were already visited or were appended this frame
//! (split fragments), so nothing is skipped and fragments wait until the
//! next frame to collide.

use super::state::{Player, RoundMode, Session};

/// What happened during one resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Ship-asteroid impacts
    pub ship_hits: u32,
    /// Asteroids destroyed by projectiles
    pub asteroids_shot: u32,
    /// Fragments produced by splits
    pub fragments_spawned: u32,
    /// A ship ran out of health during this pass
    pub ship_destroyed: bool,
}

/// Resolve ship and projectile collisions against every live asteroid
pub fn resolve_collisions(session: &mut Session) -> CollisionReport {
    let mut report = CollisionReport::default();

    let mut i = session.live_asteroids.len();
    while i > 0 {
        i -= 1;
        let asteroid = session.asteroid_pool[session.live_asteroids[i]];
        let bounds = asteroid.bounds(&session.tuning);

        // Ship impacts take priority over projectile hits
        let struck = session
            .ships
            .iter()
            .position(|ship| ship.bounds(&session.tuning).intersects(&bounds));
        if let Some(ship_index) = struck {
            let ship = &mut session.ships[ship_index];
            ship.take_hit();
            let player = ship.player;
            let destroyed = ship.is_destroyed();
            log::debug!(
                "{:?} hit by {:?} asteroid, health now {}",
                player,
                asteroid.size,
                ship.health
            );

            session.despawn_asteroid(i);
            report.ship_hits += 1;

            if destroyed {
                report.ship_destroyed = true;
                if session.mode == RoundMode::Playing {
                    log::info!("{:?} destroyed at wave {}", player, session.wave);
                }
                session.mode = RoundMode::GameOver;
            }
            continue;
        }

        for ship_index in 0..session.ships.len() {
            let ship = &mut session.ships[ship_index];
            let hit = ship
                .projectiles
                .iter()
                .rposition(|p| p.bounds(&session.tuning).intersects(&bounds));
            let Some(projectile_index) = hit else {
                continue;
            };

            ship.projectiles.remove(projectile_index);
            let player = ship.player;
            award_points(session, player);

            if let Some(child) = asteroid.size.next_smaller() {
                let factor = session.tuning.split_speed_factor;
                for vel in asteroid.fragment_velocities(factor) {
                    session.spawn_asteroid(child, asteroid.pos, vel);
                }
                report.fragments_spawned += 2;
            }
            log::debug!(
                "{:?} shot {:?} asteroid at ({:.0}, {:.0})",
                player,
                asteroid.size,
                asteroid.pos.x,
                asteroid.pos.y
            );

            session.despawn_asteroid(i);
            report.asteroids_shot += 1;
            break;
        }
    }

    report
}

fn award_points(session: &mut Session, player: Player) {
    let score = &mut session.scores[player.index()];
    *score = score.saturating_add(session.tuning.points_per_asteroid);
}
